//! SkillzUp - Learning Resource Aggregator
//!
//! This crate implements the SkillzUp backend: account sessions, AI-generated
//! learning roadmaps, resource search proxies, a persistent chat assistant and
//! premium subscriptions paid through a payment gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
