pub mod use_cases;

pub use use_cases::plan_lookup::PlanLookupUseCase;
