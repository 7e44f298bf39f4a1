use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::error::Res;

/// JSON success responses shared by every route handler.
pub struct Success;

impl Success {
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Ok(HttpResponse::Ok().json(body))
    }

    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Ok(HttpResponse::Created().json(body))
    }
}
