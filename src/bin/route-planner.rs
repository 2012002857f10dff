use waste_route::planner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    planner::run().await
}
