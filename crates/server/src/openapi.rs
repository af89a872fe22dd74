use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct UserDoc { pub id: i64, pub name: String, pub age: i32 }

#[derive(Serialize, ToSchema)]
pub struct UserEnvelopeDoc {
    pub product: UserDoc,
    pub message: String,
    #[serde(rename = "status-code")]
    pub status_code: u16,
}

#[derive(Serialize, ToSchema)]
pub struct UsersEnvelopeDoc {
    pub product: Vec<UserDoc>,
    pub message: String,
    #[serde(rename = "status-code")]
    pub status_code: u16,
}

/// `product` is always `null`.
#[derive(Serialize, ToSchema)]
pub struct EmptyEnvelopeDoc {
    pub product: Option<UserDoc>,
    pub message: String,
    #[serde(rename = "status-code")]
    pub status_code: u16,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::get_all,
        crate::routes::users::get_by_id,
        crate::routes::users::update,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            UserEnvelopeDoc,
            UsersEnvelopeDoc,
            EmptyEnvelopeDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
