pub mod fees;
pub mod impermanent_loss;

pub use fees::{AccrualParams, accrued_fees, accrued_funding};
pub use impermanent_loss::{
    PositionBaseline, PositionOutcome, calculate_position, try_calculate_position,
};
