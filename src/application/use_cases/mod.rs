pub mod plan_lookup;
