pub mod ai_service;
pub mod chunker;
pub mod leakage_filter;
pub mod prompt_builder;
pub mod quiz_service;
pub mod response_parser;
pub mod source_service;
pub mod synthesis_service;
