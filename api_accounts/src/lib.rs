use actix_web::web::{self};

pub mod routes {
    pub mod account;
    pub mod auth;
    pub mod health;
}

mod services {
    pub(crate) mod account;
    pub(crate) mod credentials;
    pub(crate) mod entitlement;
    pub(crate) mod policy;
}

mod dtos {
    pub(crate) mod account;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/login").service(routes::auth::post_login)
}

pub fn mount_accounts() -> actix_web::Scope {
    web::scope("/users")
        .service(routes::account::post_create)
        .service(routes::account::get_by_email)
        .service(routes::account::put_update)
        .service(routes::account::put_change_email)
        .service(routes::account::put_change_password)
        .service(routes::account::put_extend_subscription)
        .service(routes::account::delete_by_email)
}
