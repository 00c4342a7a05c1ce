//! Debug script: runs the demo blueprint through a dry generation and
//! prints every artifact path plus the patched root module.

use nestforge_engine::model::demo_blueprint;
use nestforge_engine::sink::MemorySink;
use nestforge_engine::{GenerationSession, GeneratorConfig};

fn main() {
    let blueprint = demo_blueprint();
    println!("{}", blueprint.to_json_pretty());

    let config = GeneratorConfig::default();
    let entities = match blueprint.into_entities() {
        Ok(entities) => entities,
        Err(e) => {
            println!("Error: {e:?}");
            return;
        }
    };

    let mut sink = MemorySink::new();
    let mut session = GenerationSession::new(&mut sink, config);
    match session.generate_batch(&entities) {
        Ok(report) => {
            for entity in &report.entities {
                println!("\n{} ({} artifacts):", entity.entity, entity.artifacts.len());
                for path in &entity.artifacts {
                    println!("  {path}");
                }
                for warning in &entity.warnings {
                    println!("  warning: {warning}");
                }
            }
            if let Some(root) = sink.get("src/app.module.ts") {
                println!("\nsrc/app.module.ts:\n{root}");
            }
        }
        Err(e) => {
            println!("Error: {e:?}");
        }
    }
}
