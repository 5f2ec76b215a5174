//! Scoping an engagement count by injection type
//!
//! Run with: RUST_LOG=debug cargo run --example injection_scope

use scopeagg_core::{FeatureDescriptor, PersonalDataType};
use scopeagg_runtime::{inherit_personal_data_types, FeatureValueMap, ScopedAggregateBuilder};
use std::collections::HashMap;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Scoped Aggregate Example ===\n");

    let count = FeatureDescriptor::continuous("u.pair.any.any.5.days.count", [PersonalDataType::UserId]);
    let builder = ScopedAggregateBuilder::new(
        vec![count.clone()],
        vec!["Recap".to_string(), "WhoToFollow".to_string()],
        "InjectionType",
        inherit_personal_data_types,
    )?;

    println!("1. Feature context:");
    for descriptor in &builder.feature_context() {
        println!("   {} -> {}", descriptor.id(), descriptor);
    }

    println!("\n2. Building a record:");
    let mut partitions: HashMap<String, FeatureValueMap> = HashMap::new();
    partitions.insert("Recap".to_string(), [(count.id(), 3.0)].into_iter().collect());
    partitions.insert("WhoToFollow".to_string(), [(count.id(), 7.0)].into_iter().collect());
    partitions.insert("Unknown".to_string(), [(count.id(), 1.0)].into_iter().collect());

    let record = builder.build_aggregates(&partitions);
    println!("   {}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
