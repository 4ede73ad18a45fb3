pub mod user;
pub mod room;
pub mod schedule;
pub mod seat;
pub mod reservation;

pub use user::User;
pub use room::Room;
pub use schedule::Schedule;
pub use seat::{SeatId, SeatStatus, SeatView};
pub use reservation::{Reservation, ReservationStatus};
