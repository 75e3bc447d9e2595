//! Candidate selection for match peaks.

pub(crate) mod best;
pub(crate) mod nms;
pub(crate) mod topk;
