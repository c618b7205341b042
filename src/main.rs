#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    exercise_plan_lib::run().await
}
