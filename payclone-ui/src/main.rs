//! PayClone Dashboard
//!
//! Peer-to-peer payments dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Balance, weekly activity and recent transactions
//! - Filterable transaction history with CSV export
//! - Spending analytics and insights
//! - Notification center and money requests
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the payments REST API over HTTP and reuses the
//! `payclone` crate for models, analytics, filters and validation.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
