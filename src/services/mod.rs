// Business logic services

pub mod exercise_service;
pub mod history_service;
pub mod routine_service;
pub mod workout_service;

pub use exercise_service::ExerciseService;
pub use history_service::HistoryService;
pub use routine_service::RoutineService;
pub use workout_service::WorkoutService;
