//! Database seeder for Cofex development and testing.
//!
//! Seeds demo exports across the pipeline by driving the real workflow
//! engine, so every seeded record carries a consistent transition
//! history. Also prints a development JWT per role for exercising the
//! API by hand.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use cofex_core::workflow::types::{ActorRole, ExportStatus, TransitionKind};
use cofex_core::workflow::{StatusRegistry, TransitionTable, WorkflowService};
use cofex_db::repositories::export::{CreateExportInput, ExportRepository};
use cofex_db::repositories::workflow::WorkflowRepository;
use cofex_shared::{JwtConfig, JwtService};

/// Demo exporter ID (consistent for all seeds).
const DEMO_EXPORTER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// One demo export to seed.
struct DemoExport {
    coffee_type: &'static str,
    quantity_kg: Decimal,
    value_usd: Decimal,
    destination_country: &'static str,
    target: ExportStatus,
    rejection_reason: Option<&'static str>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = cofex_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    WorkflowService::validate_configuration().expect("workflow configuration must validate");

    let demos = [
        DemoExport {
            coffee_type: "Yirgacheffe Grade 1",
            quantity_kg: dec!(18000.00),
            value_usd: dec!(96000.00),
            destination_country: "Germany",
            target: ExportStatus::Pending,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Sidamo Grade 2",
            quantity_kg: dec!(9600.00),
            value_usd: dec!(48000.00),
            destination_country: "Japan",
            target: ExportStatus::EcxPending,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Guji Natural",
            quantity_kg: dec!(12000.00),
            value_usd: dec!(78000.00),
            destination_country: "United States",
            target: ExportStatus::EctaQualityPending,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Limu Washed",
            quantity_kg: dec!(21600.00),
            value_usd: dec!(112000.00),
            destination_country: "Italy",
            target: ExportStatus::FxApplicationPending,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Harrar Longberry",
            quantity_kg: dec!(6000.00),
            value_usd: dec!(39000.00),
            destination_country: "Saudi Arabia",
            target: ExportStatus::FxRejected,
            rejection_reason: Some("export proceeds account not confirmed"),
        },
        DemoExport {
            coffee_type: "Yirgacheffe Grade 2",
            quantity_kg: dec!(19200.00),
            value_usd: dec!(88000.00),
            destination_country: "Netherlands",
            target: ExportStatus::ShipmentScheduled,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Sidamo Grade 4",
            quantity_kg: dec!(3000.00),
            value_usd: dec!(12500.00),
            destination_country: "China",
            target: ExportStatus::Completed,
            rejection_reason: None,
        },
        DemoExport {
            coffee_type: "Jimma Sundried",
            quantity_kg: dec!(4800.00),
            value_usd: dec!(16800.00),
            destination_country: "France",
            target: ExportStatus::Cancelled,
            rejection_reason: None,
        },
    ];

    let exports = ExportRepository::new(db.clone());
    let workflow = WorkflowRepository::new(db);

    for demo in demos {
        println!(
            "Seeding {} -> {} ({})",
            demo.coffee_type,
            demo.target,
            demo.destination_country
        );
        seed_export(&exports, &workflow, &demo).await;
    }

    println!("\nDevelopment tokens:");
    print_dev_tokens();

    println!("\nSeeding complete!");
}

fn demo_exporter_id() -> Uuid {
    Uuid::parse_str(DEMO_EXPORTER_ID).unwrap()
}

/// Stable demo actor ID per role.
fn demo_actor_id(role: ActorRole) -> Uuid {
    if role == ActorRole::Exporter {
        return demo_exporter_id();
    }
    let index = ActorRole::ALL.iter().position(|r| *r == role).unwrap_or(0);
    Uuid::from_u128(0x1000 + index as u128)
}

/// Creates an export and drives it to the target status through the
/// real engine, one transition at a time.
async fn seed_export(
    exports: &ExportRepository,
    workflow: &WorkflowRepository,
    demo: &DemoExport,
) {
    let export = exports
        .create_export(CreateExportInput {
            exporter_id: demo_exporter_id(),
            coffee_type: demo.coffee_type.to_string(),
            quantity_kg: demo.quantity_kg,
            value_usd: demo.value_usd,
            destination_country: demo.destination_country.to_string(),
            as_draft: false,
        })
        .await
        .expect("Failed to create export");

    let mut current = ExportStatus::Pending;

    // A rejected demo first walks to its stage's pending status.
    let forward_target = if StatusRegistry::definition(demo.target).is_rejection {
        StatusRegistry::pending_status_of(demo.target.stage())
            .expect("rejection stage has a pending status")
    } else if demo.target == ExportStatus::Cancelled {
        ExportStatus::Pending
    } else {
        demo.target
    };

    while current != forward_target {
        let rule = TransitionTable::rules_from(current)
            .iter()
            .copied()
            .find(|r| r.kind == TransitionKind::Approval && r.to != ExportStatus::Cancelled)
            .unwrap_or_else(|| panic!("no forward edge out of {current}"));

        let updated = workflow
            .apply_transition(
                export.export_id,
                rule.to,
                rule.required_role.as_str(),
                demo_actor_id(rule.required_role),
                None,
            )
            .await
            .expect("Failed to progress export");

        current = ExportStatus::parse(&updated.status).expect("engine returned registered status");
    }

    if let Some(reason) = demo.rejection_reason {
        let rule = TransitionTable::rules_from(current)
            .iter()
            .copied()
            .find(|r| r.kind == TransitionKind::Rejection)
            .unwrap_or_else(|| panic!("no rejection edge out of {current}"));

        workflow
            .apply_transition(
                export.export_id,
                rule.to,
                rule.required_role.as_str(),
                demo_actor_id(rule.required_role),
                Some(reason.to_string()),
            )
            .await
            .expect("Failed to reject export");
    } else if demo.target == ExportStatus::Cancelled {
        workflow
            .apply_transition(
                export.export_id,
                ExportStatus::Cancelled,
                ActorRole::Exporter.as_str(),
                demo_exporter_id(),
                None,
            )
            .await
            .expect("Failed to cancel export");
    }
}

/// Prints a development JWT for every human role.
fn print_dev_tokens() {
    let secret = std::env::var("COFEX__JWT__SECRET")
        .unwrap_or_else(|_| "change-me-in-production".to_string());
    let jwt = JwtService::new(JwtConfig {
        secret,
        access_token_expires_minutes: 8 * 60,
    });

    for role in ActorRole::ALL.iter().filter(|r| !r.is_system()) {
        let token = jwt
            .generate_access_token(demo_actor_id(*role), role.as_str())
            .expect("Failed to generate token");
        println!("  {role}: {token}");
    }
}
