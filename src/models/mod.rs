pub mod event;
pub mod forecast;
pub mod user_state;

pub use event::{InboundEvent, Keyboard, GET_ADVICE};
pub use forecast::{Bucket, Forecast, ForecastKind, Snapshot};
pub use user_state::UserState;
