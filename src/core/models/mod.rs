//! Core data models for the Gateway

pub mod openai;
