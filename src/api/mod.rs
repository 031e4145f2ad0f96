// API routes and handlers

pub mod exercises;
pub mod extract;
pub mod health;
pub mod history;
pub mod openapi;
pub mod routes;
pub mod routines;
pub mod state;
pub mod workouts;
