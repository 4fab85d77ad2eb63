use muster::run_main;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_main()?;
    Ok(())
}
