pub mod agent_service;
pub mod gmail_service;
pub mod intent_service;
pub mod llm_service;
