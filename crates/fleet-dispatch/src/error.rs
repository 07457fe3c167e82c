use fleet_core::{OrderName, OrderStatus, RobotName};
use fleet_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("routing failed: {0}")]
    Routing(#[from] GraphError),

    #[error("order {0} already exists")]
    DuplicateOrderName(OrderName),

    #[error("robot {0} already exists")]
    DuplicateRobotName(RobotName),

    #[error("robot {0} not found")]
    UnknownRobot(RobotName),

    #[error("order {0} not found")]
    UnknownOrder(OrderName),

    #[error("robot {0} already has an active route")]
    RobotBusy(RobotName),

    #[error("order {order} is {status} and cannot be assigned")]
    NotAssignable { order: OrderName, status: OrderStatus },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
