use crate::model::{ArrowId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("unknown arrow: {0}")]
    UnknownArrow(ArrowId),

    #[error("arrow {arrow} has a missing endpoint")]
    DanglingArrow { arrow: ArrowId },
}

pub type Result<T> = std::result::Result<T, GraphError>;
