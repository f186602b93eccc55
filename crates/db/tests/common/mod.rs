//! Shared factory helpers for repository integration tests.

use rust_decimal::Decimal;
use sqlx::PgPool;

use mendlet_db::models::maintenance_request::{CreateMaintenanceRequest, MaintenanceRequest};
use mendlet_db::models::profile::{CreateProfile, Profile};
use mendlet_db::models::property::{CreateProperty, Property};
use mendlet_db::models::worker::{CreateWorker, Worker};
use mendlet_db::repositories::{ProfileRepo, PropertyRepo, RequestRepo, WorkerRepo};

pub async fn new_profile(pool: &PgPool, username: &str, role: &str) -> Profile {
    let input = CreateProfile {
        username: username.to_string(),
        email: format!("{username}@mendlet.local"),
        password_hash: "$argon2id$test-hash".to_string(),
        role: role.to_string(),
        full_name: format!("{username} test"),
        phone: None,
    };
    ProfileRepo::create(pool, &input)
        .await
        .expect("profile creation should succeed")
}

pub async fn new_property(pool: &PgPool, landlord_id: uuid::Uuid, name: &str) -> Property {
    let input = CreateProperty {
        name: name.to_string(),
        address: format!("1 {name} Road, London"),
        property_type: "flat".to_string(),
        units: 1,
        rent_per_unit: Decimal::new(120000, 2),
        landlord_id: None,
    };
    PropertyRepo::create(pool, landlord_id, &input)
        .await
        .expect("property creation should succeed")
}

pub async fn new_worker(pool: &PgPool, name: &str, category: &str) -> Worker {
    let input = CreateWorker {
        name: name.to_string(),
        specialty: format!("{category} repairs"),
        category: category.to_string(),
        phone: None,
    };
    WorkerRepo::create(pool, &input)
        .await
        .expect("worker creation should succeed")
}

pub async fn new_request(
    pool: &PgPool,
    tenant_id: uuid::Uuid,
    property_id: uuid::Uuid,
    category: &str,
    priority: &str,
) -> MaintenanceRequest {
    let input = CreateMaintenanceRequest {
        category: category.to_string(),
        subcategory: None,
        title: format!("{category} issue"),
        description: "Something needs fixing".to_string(),
        room: Some("Kitchen".to_string()),
        photo_urls: None,
        priority: priority.to_string(),
    };
    RequestRepo::create(pool, tenant_id, property_id, &input)
        .await
        .expect("request creation should succeed")
}

/// Tenant + leased property + landlord, the baseline fixture for
/// lifecycle tests. Returns (tenant, landlord, property).
pub async fn tenancy_fixture(pool: &PgPool) -> (Profile, Profile, Property) {
    let landlord = new_profile(pool, "l_owner", "landlord").await;
    let tenant = new_profile(pool, "t_renter", "tenant").await;
    let property = new_property(pool, landlord.id, "Maple Court").await;
    ProfileRepo::assign_property(pool, tenant.id, property.id)
        .await
        .expect("lease should succeed")
        .expect("tenant row should exist");
    (tenant, landlord, property)
}
