#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

mod api;
mod error;

#[rocket::main]
async fn main() {
    env_logger::init();

    let result = rocket::build().mount("/", api::routes()).launch().await;

    assert!(result.is_ok());
}
