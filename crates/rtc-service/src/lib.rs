//! # rtc-service
//!
//! Application layer: the membership authority, direct-message resolver, and
//! message service, wired together through a `ServiceContext`.

pub mod services;

pub use services::{
    ContextBuildError, DirectRoomService, MembershipService, MessageService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
