// handlers/public/mod.rs - Public handlers (no session required)
//
// Every /api/* path is on the public allow-list, so these are reachable
// anonymously. The events listing also answers cross-origin requests.

pub mod events;
pub mod guide;
pub mod system;
