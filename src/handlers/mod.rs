// handlers/mod.rs - Handler tiers
//
// Public (no session needed) -> Protected (per-route session via AuthUser).
// Route gating for pages happens earlier, in middleware::gate; these tiers only
// describe what each handler itself demands.
pub mod pages;
pub mod protected;
pub mod public;
