use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::error::ErrorResponse;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PhD Portal API",
        description = "Scholar records, coursework certificates, enrollment statistics and collaboration"
    ),
    paths(
        routes::health::route::health,
        routes::auth::route::signup,
        routes::auth::route::login,
        routes::auth::route::logout,
        routes::auth::route::refresh,
        routes::auth::route::me,
        routes::auth::route::change_password,
        routes::scholars::route::get_scholar,
        routes::scholars::route::update_scholar,
        routes::scholars::route::get_all_scholars,
        routes::scholars::route::get_supervised_scholars,
        routes::certificates::route::upload_certificate,
        routes::certificates::route::get_scholar_certificates,
        routes::certificates::route::review_certificate,
        routes::certificates::route::get_all_certificates,
        routes::stats::route::get_statistics,
        routes::stats::route::export_statistics,
        routes::users::route::get_all_users,
        routes::users::route::update_roles,
        routes::collaborations::route::get_discussions,
        routes::collaborations::route::create_discussion,
        routes::collaborations::route::get_discussion,
        routes::collaborations::route::reply_to_discussion,
        routes::collaborations::route::get_meetings,
        routes::collaborations::route::create_meeting,
        routes::collaborations::route::get_meeting,
        routes::collaborations::route::comment_on_meeting,
        routes::collaborations::route::get_events,
        routes::collaborations::route::create_event,
        routes::collaborations::route::get_event,
        routes::collaborations::route::comment_on_event,
    ),
    components(schemas(ErrorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health"),
        (name = "Authentication", description = "Signup, sessions and passwords"),
        (name = "Scholars", description = "Scholar record store"),
        (name = "Certificates", description = "Coursework certificate upload and review"),
        (name = "Statistics", description = "Enrollment by faculty and program mode"),
        (name = "Users", description = "Account administration"),
        (name = "Collaborations", description = "Discussions, meetings and events")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
