#![cfg_attr(not(test), no_std)]

//! Blink server core
//!
//! Platform-independent part of the blink firmware:
//! - `gpio` - Output pin abstraction and the ownership guard shared with the activity
//! - `lifecycle` - Blink activity, task runtime port and the start/stop controller
//! - `assets` - Read-only static asset store port
//! - `http` - Response header formatting and request line parsing
//! - `router` - Route table and request dispatch
//! - `request_log` - Per-request log entries and the sink they are recorded to
//!
//! Hardware, scheduler and network bindings live in the firmware crate and
//! reach this crate only through the traits defined here.

pub mod assets;
pub mod gpio;
pub mod http;
pub mod lifecycle;
pub mod request_log;
pub mod router;

pub use assets::{Asset, AssetError, AssetStore, StaticAssetStore};
pub use gpio::{GpioOutput, PinLevel, SharedPin};
pub use lifecycle::{
    ActivityTicket,
    BlinkActivity,
    BlinkConfig,
    BlinkControl,
    LifecycleController,
    LifecycleError,
    LifecycleState,
    SpawnError,
    TaskRuntime,
};
pub use request_log::{RequestLog, RequestLogEntry};
pub use router::{Body, ControlCommand, Response, Route, RouteAction, Router, ROUTES};
