//! VarshanAI - Backend for the VarshanAI chat assistant
//!
//! This crate implements the generation core of the chat application:
//! resilient multi-key Gemini invocation, tool-augmented chat turns
//! (web search, image generation), and the auxiliary title/regenerate
//! flows, exposed over a small HTTP surface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
