pub(crate) mod linkage;
pub(crate) mod positions_model;
pub(crate) mod positions_repository;
pub(crate) mod positions_service;
pub(crate) mod positions_traits;

pub use linkage::{
    assignment_effect, close_lot, position_from_assignment, select_fifo, AssignmentEffect,
    PositionClose,
};
pub use positions_model::{
    NewPosition, Position, PositionFilters, PositionSale, PositionUpdate,
};
pub use positions_repository::PositionRepository;
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};

pub(crate) use positions_repository::apply_assignment_effect;
