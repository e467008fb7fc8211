use crate::catalog;
use crate::catalog::error::CatalogError;
use crate::database::DbPool;
use dto::class_offering::{ClassOffering, NewClassOffering};
use dto::package_offering::{NewPackageOffering, PackageOffering};
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;

#[post("/classes", format = "application/json", data = "<offering>")]
pub async fn create_class_offering(
    pool: &State<DbPool>,
    offering: Json<NewClassOffering>,
) -> Result<Json<ClassOffering>, Custom<String>> {
    catalog::create_class_offering(pool.inner(), &offering.into_inner())
        .map(Json)
        .map_err(to_response)
}

#[get("/classes/<class_id>")]
pub async fn get_class_offering(
    pool: &State<DbPool>,
    class_id: i32,
) -> Result<Json<ClassOffering>, Custom<String>> {
    catalog::get_class_offering(pool.inner(), class_id)
        .map(Json)
        .map_err(to_response)
}

#[get("/packages/<package_id>")]
pub async fn get_package_offering(
    pool: &State<DbPool>,
    package_id: i32,
) -> Result<Json<PackageOffering>, Custom<String>> {
    catalog::get_package_offering(pool.inner(), package_id)
        .map(Json)
        .map_err(to_response)
}

#[get("/classes")]
pub async fn list_class_offerings(
    pool: &State<DbPool>,
) -> Result<Json<Vec<ClassOffering>>, Custom<String>> {
    catalog::list_class_offerings(pool.inner())
        .map(Json)
        .map_err(to_response)
}

#[post("/packages", format = "application/json", data = "<offering>")]
pub async fn create_package_offering(
    pool: &State<DbPool>,
    offering: Json<NewPackageOffering>,
) -> Result<Json<PackageOffering>, Custom<String>> {
    catalog::create_package_offering(pool.inner(), &offering.into_inner())
        .map(Json)
        .map_err(to_response)
}

#[get("/packages")]
pub async fn list_package_offerings(
    pool: &State<DbPool>,
) -> Result<Json<Vec<PackageOffering>>, Custom<String>> {
    catalog::list_package_offerings(pool.inner())
        .map(Json)
        .map_err(to_response)
}

fn to_response(error: CatalogError) -> Custom<String> {
    match error {
        CatalogError::UnknownClassOffering(_) | CatalogError::UnknownPackageOffering(_) => {
            Custom(Status::NotFound, error.to_string())
        }
        CatalogError::Database(ref database_error) if database_error.is_transient() => Custom(
            Status::ServiceUnavailable,
            "The service is briefly unavailable, please try again.".to_owned(),
        ),
        CatalogError::Database(_) => {
            error!("{error:#?}");
            Custom(
                Status::InternalServerError,
                "Something went wrong, please try again later.".to_owned(),
            )
        }
        _ => Custom(Status::BadRequest, error.to_string()),
    }
}
