//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, errors, role evaluator, realtime events)
//! - `catalog` - Services, moderation status and search
//! - `booking` - Booking lifecycle state machine
//! - `review` - Reviews and provider responses
//! - `user` - Profiles and role changes
//! - `notification` - Notifications and the per-user inbox
//! - `live_view` - Client-side caches fed by realtime deltas
//! - `dashboard` - Admin summary figures

pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod foundation;
pub mod live_view;
pub mod notification;
pub mod review;
pub mod user;
