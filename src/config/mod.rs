//! Command-line configuration and significant-option resolution
//!
//! The configuration surface is the full hyperparameter set of a
//! training/evaluation invocation. Resolution narrows it to the subset
//! that matters for run identity: allow-listed options whose values
//! deviate from their defaults, plus a couple of conditional extras.

mod cli;
mod significant;



pub use cli::{
    parse_args, Cli, DocClass, EntityRep, MemType, MentEmb, MentLoss, OptValue, OptionTable,
    SimFunc,
};
pub use significant::{
    resolve_significant, FsProbe, PathProbe, SignificantOpts, SIGNIFICANT_OPTS,
};
