pub mod mood;
pub mod mood_calc;
pub mod refresh_lock;
