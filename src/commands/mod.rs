pub(crate) mod addcheat;
pub(crate) mod branch;
pub(crate) mod commit;
pub(crate) mod context;
pub(crate) mod pr;
pub(crate) mod scan;

pub(crate) use addcheat::{AddcheatOptions, handle_addcheat};
pub(crate) use branch::{BranchOptions, handle_branch};
pub(crate) use commit::{CommitOptions, handle_commit};
pub(crate) use context::CommandEnv;
pub(crate) use pr::{PrOptions, handle_pr_create};
pub(crate) use scan::handle_scan;
