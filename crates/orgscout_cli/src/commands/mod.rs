pub(crate) mod orgs;
pub(crate) mod shared;
pub(crate) mod topic;
