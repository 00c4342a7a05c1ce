use nestforge_engine::model::demo_blueprint;
use nestforge_engine::sink::{FsSink, MemorySink};
use nestforge_engine::{
    Cardinality, Entity, FieldType, GenerationSession, GenerationWarning, GeneratorConfig,
};

fn post() -> Entity {
    Entity::new("post").with_field("title", FieldType::String)
}

fn comment() -> Entity {
    Entity::new("comment")
        .with_field("body", FieldType::Text)
        .with_relation("post", Cardinality::ManyToOne)
}

#[test]
fn demo_blueprint_full_batch() {
    let entities = demo_blueprint().into_entities().unwrap();
    let mut sink = MemorySink::new();
    let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
    let report = session.generate_batch(&entities).unwrap();

    assert_eq!(report.entities.len(), 4);
    // The tag <-> post pivot is the only soft finding in the demo domain.
    assert_eq!(report.warning_count(), 1);
    assert!(matches!(
        report.entities[3].warnings[0],
        GenerationWarning::ManyToManyPivot { .. }
    ));

    let root = sink.get("src/app.module.ts").unwrap();
    for module in ["UserModule", "PostModule", "CommentModule", "TagModule"] {
        assert!(root.contains(module), "{module} not registered");
    }

    // comment n-1 post landed its key; tag n-n did not.
    let comment_dto = sink
        .get("src/comment/application/dtos/create-comment.dto.ts")
        .unwrap();
    assert!(comment_dto.contains("postId"));
    let tag_dto = sink.get("src/tag/application/dtos/create-tag.dto.ts").unwrap();
    assert!(!tag_dto.contains("postId"));
}

#[test]
fn incremental_generation_across_sessions() {
    let mut sink = MemorySink::new();
    {
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        session.generate(&post()).unwrap();
    }

    let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
    let report = session.generate(&comment()).unwrap();
    assert!(report.warnings.is_empty(), "unexpected: {:?}", report.warnings);

    let root = sink.get("src/app.module.ts").unwrap();
    assert_eq!(root.matches("\n    PostModule,").count(), 1);
    assert_eq!(root.matches("\n    CommentModule,").count(), 1);

    let post_entity = sink.get("src/post/domain/entities/post.entity.ts").unwrap();
    assert!(post_entity.contains("get comments(): Comment[]"));
}

#[test]
fn filesystem_project_grows_across_runs() {
    let dir = tempfile::TempDir::new().unwrap();

    {
        let mut sink = FsSink::new(dir.path());
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        session.generate(&post()).unwrap();
    }

    // A second invocation against the same directory sees the earlier
    // artifacts on disk and retrofits into them.
    let mut sink = FsSink::new(dir.path());
    let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
    let report = session.generate(&comment()).unwrap();
    assert!(report.warnings.is_empty(), "unexpected: {:?}", report.warnings);

    let post_entity =
        std::fs::read_to_string(dir.path().join("src/post/domain/entities/post.entity.ts"))
            .unwrap();
    assert!(post_entity.contains("private _comments: Comment[] = [],"));

    let dto = std::fs::read_to_string(
        dir.path()
            .join("src/comment/application/dtos/create-comment.dto.ts"),
    )
    .unwrap();
    assert!(dto.contains("postId: string;"));
}

#[test]
fn rerunning_an_entity_converges_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();

    {
        let mut sink = FsSink::new(dir.path());
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        session.generate_batch(&[post(), comment()]).unwrap();
    }
    let entity_path = dir.path().join("src/comment/domain/entities/comment.entity.ts");
    let dto_path = dir
        .path()
        .join("src/comment/application/dtos/create-comment.dto.ts");
    let entity_before = std::fs::read_to_string(&entity_path).unwrap();
    let dto_before = std::fs::read_to_string(&dto_path).unwrap();

    // Regenerating the same entity rewrites its files fresh and re-applies
    // the relation; only the reciprocal side reports already-patched.
    let mut sink = FsSink::new(dir.path());
    let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
    let report = session.generate(&comment()).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        GenerationWarning::AlreadyPatched { path, .. } if path.ends_with("post.entity.ts")
    ));

    assert_eq!(std::fs::read_to_string(&entity_path).unwrap(), entity_before);
    assert_eq!(std::fs::read_to_string(&dto_path).unwrap(), dto_before);
}

#[test]
fn dry_run_projection_lists_everything() {
    let mut sink = MemorySink::new();
    let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
    let report = session.generate(&post()).unwrap();

    assert_eq!(report.artifacts.len(), 15);
    // 15 per-entity artifacts plus the root module.
    assert_eq!(sink.file_count(), 16);
    assert!(sink.paths().contains(&"src/app.module.ts"));
    assert!(sink.paths().contains(&"src/post/post.module.ts"));
}
