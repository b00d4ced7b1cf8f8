mod session;

pub use session::{
    validate_target_hours, Phase, SessionTimer, ToggleTransition, ALLOWED_TARGET_HOURS,
    CHECKIN_INTERVAL_SECS, DEFAULT_FOCUS, DEFAULT_TARGET_HOURS,
};
