pub mod agent_repository;
pub mod assignment_repository;
pub mod chat_session_repository;
pub mod task_spawner;
pub mod time_service;
