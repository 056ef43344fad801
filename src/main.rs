use std::error::Error;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    planboard::rocket().launch().await?;

    Ok(())
}
