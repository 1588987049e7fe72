pub(crate) mod add;
pub(crate) mod github;
pub(crate) mod import;
pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod serve;
pub(crate) mod shared;
pub(crate) mod token;
