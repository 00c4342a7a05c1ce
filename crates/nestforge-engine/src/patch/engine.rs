//! The retrofit engine: anchored patches against generated artifacts.

use crate::codegen::layout::{self, ModuleLayout};
use crate::codegen::project::generate_app_module;
use crate::codegen::FILE_BANNER;
use crate::config::{GeneratorConfig, OrmProfile};
use crate::diagnostic::{GenerationWarning, GeneratorError};
use crate::model::{resolve, Field, FieldType, Ownership, Reciprocal, RelationDecl};
use crate::naming::{to_camel_case, to_pascal_case};
use crate::patch::anchors;
use crate::sink::{ArtifactSink, PatchOutcome, TextPatch};
use crate::typemap::api_property;

/// Retrofits a relation declared by `source` into the artifacts of both
/// sides. The owner side (per [`resolve`]) gains the scalar foreign key in
/// its create/update DTOs, mapper, domain entity, and schema; the non-owner
/// side gains the reciprocal field in its domain entity.
///
/// Misses are collected as warnings rather than aborting: a hand-edited or
/// missing target leaves that one file unpatched while the rest of the
/// relation still lands. Many-to-many resolves to no owner and returns a
/// single pivot warning without touching any file.
pub fn apply_relation(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    source: &str,
    relation: &RelationDecl,
) -> Result<Vec<GenerationWarning>, GeneratorError> {
    let Some(ownership) = resolve(source, relation) else {
        return Ok(vec![GenerationWarning::ManyToManyPivot {
            source: source.to_string(),
            target: relation.target.clone(),
        }]);
    };

    let mut warnings = Vec::new();
    patch_create_dto(sink, config, &ownership, &mut warnings)?;
    patch_update_dto(sink, config, &ownership, &mut warnings)?;
    patch_mapper(sink, config, &ownership, &mut warnings)?;
    patch_owner_entity(sink, config, &ownership, &mut warnings)?;
    patch_owner_schema(sink, config, &ownership, &mut warnings)?;
    patch_related_entity(sink, config, &ownership, &mut warnings)?;
    Ok(warnings)
}

/// Registers an entity module in the root application module: one import
/// line above the `@Module` decorator and one entry in the imports array.
/// Creates the root module first when the sink does not have one yet.
/// Re-registration is keyed on the exact import line, so repeated runs are
/// no-ops.
pub fn register_module(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    entity_name: &str,
) -> Result<Vec<GenerationWarning>, GeneratorError> {
    let mut warnings = Vec::new();
    let module_layout = ModuleLayout::new(entity_name, config.architecture);
    let module_class = format!("{}Module", to_pascal_case(entity_name));

    let content = match sink.read_file(layout::APP_MODULE_FILE)? {
        Some(content) => content,
        None => {
            let fresh = generate_app_module(config);
            sink.write_file(layout::APP_MODULE_FILE, &fresh)?;
            fresh
        }
    };

    let specifier = layout::import_specifier(layout::APP_MODULE_FILE, &module_layout.module_file());
    let import_line = format!("import {{ {module_class} }} from '{specifier}';");
    if content.contains(&import_line) {
        return Ok(warnings);
    }

    apply_or_warn(
        sink,
        layout::APP_MODULE_FILE,
        &TextPatch::insert_before(anchors::ROOT_MODULE_OPEN, format!("\n{import_line}")),
        &mut warnings,
    )?;
    apply_or_warn(
        sink,
        layout::APP_MODULE_FILE,
        &TextPatch::insert_before(anchors::ROOT_IMPORTS_CLOSE, format!("\n    {module_class},")),
        &mut warnings,
    )?;
    Ok(warnings)
}

fn apply_or_warn(
    sink: &mut dyn ArtifactSink,
    path: &str,
    patch: &TextPatch,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    match sink.patch_file(path, patch)? {
        PatchOutcome::Patched => {}
        PatchOutcome::PatternNotFound => warnings.push(GenerationWarning::AnchorNotFound {
            path: path.to_string(),
            anchor: patch.anchor.clone(),
        }),
        PatchOutcome::NotFound => warnings.push(GenerationWarning::TargetMissing {
            path: path.to_string(),
        }),
    }
    Ok(())
}

/// Adds the foreign key to the owner's create DTO as a required
/// `@IsUUID()` field, merging the validator (and `ApiProperty` when docs
/// are on) into the existing import lines.
fn patch_create_dto(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = owner.create_dto_file();
    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    let fk = &ownership.fk_field;
    // Line-anchored so a longer property name does not false-positive.
    if content.contains(&format!("\n  {fk}: string;")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path,
            field: fk.clone(),
        });
        return Ok(());
    }

    let mut block = String::new();
    if config.api_docs {
        let fk_decl = Field::new(fk.clone(), FieldType::Uuid);
        block.push_str(&format!("\n  {}", api_property(&fk_decl)));
    }
    block.push_str(&format!("\n  @IsUUID()\n  {fk}: string;\n"));

    let class_name = format!("Create{}Dto", to_pascal_case(&ownership.owner));
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_after(anchors::class_open(&class_name), block),
        warnings,
    )?;
    merge_named_import(sink, &path, "class-validator", &["IsUUID"], warnings)?;
    if config.api_docs {
        merge_named_import(sink, &path, "@nestjs/swagger", &["ApiProperty"], warnings)?;
    }
    Ok(())
}

/// Adds the foreign key to the owner's update DTO as an optional field.
/// An update DTO that derives from the create DTO through `PartialType`
/// inherits the field from the create patch and is left alone.
fn patch_update_dto(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = owner.update_dto_file();
    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    if content.contains("PartialType(") {
        return Ok(());
    }
    let fk = &ownership.fk_field;
    if content.contains(&format!("\n  {fk}?: string;")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path,
            field: fk.clone(),
        });
        return Ok(());
    }

    let class_name = format!("Update{}Dto", to_pascal_case(&ownership.owner));
    let block = format!("\n  @IsOptional()\n  @IsUUID()\n  {fk}?: string;\n");
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_after(anchors::class_open(&class_name), block),
        warnings,
    )?;
    merge_named_import(
        sink,
        &path,
        "class-validator",
        &["IsOptional", "IsUUID"],
        warnings,
    )
}

/// Threads the foreign key through all three mapper directions: the
/// `toDomain` constructor call, the `toPersistence` return object, and the
/// `toPartialPersistence` guard chain.
fn patch_mapper(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = owner.mapper_file();
    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    let fk = &ownership.fk_field;
    if content.contains(&format!("record.{fk}")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path,
            field: fk.clone(),
        });
        return Ok(());
    }

    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(anchors::CONSTRUCTOR_CALL_CLOSE, format!("\n      record.{fk},")),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(anchors::OBJECT_RETURN_CLOSE, format!("\n      {fk}: dto.{fk},")),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(
            anchors::PARTIAL_RETURN,
            format!("\n    if (dto.{fk} !== undefined) {{\n      data.{fk} = dto.{fk};\n    }}"),
        ),
        warnings,
    )
}

/// Adds the foreign key to the owner's domain entity: trailing constructor
/// parameter, getter, and `serialize()` entry. The parameter lands last so
/// the mapper's patched constructor call stays positionally aligned.
fn patch_owner_entity(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = owner.entity_file();
    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    let fk = &ownership.fk_field;
    if content.contains(&format!("_{fk}")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path,
            field: fk.clone(),
        });
        return Ok(());
    }

    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(
            anchors::CONSTRUCTOR_CLOSE,
            format!("\n    private readonly _{fk}: string,"),
        ),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(
            anchors::SERIALIZE_OPEN,
            format!("\n  get {fk}(): string {{\n    return this._{fk};\n  }}\n"),
        ),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(anchors::OBJECT_RETURN_CLOSE, format!("\n      {fk}: this._{fk},")),
        warnings,
    )
}

/// Adds the foreign-key column to the owner's persistence schema. Every
/// profile extends the record type; TypeORM and Mongoose additionally gain
/// a column/field entry in the same file, Prisma gains a model line in
/// `schema.prisma`.
fn patch_owner_schema(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = owner.schema_file(config.orm);
    let fk = &ownership.fk_field;

    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    if content.contains(&format!("  {fk}: string;")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path,
            field: fk.clone(),
        });
    } else {
        apply_or_warn(
            sink,
            &path,
            &TextPatch::insert_before(anchors::RECORD_TYPE_CLOSE, format!("\n  {fk}: string;")),
            warnings,
        )?;
        match config.orm {
            OrmProfile::TypeOrm => {
                apply_or_warn(
                    sink,
                    &path,
                    &TextPatch::insert_before(
                        anchors::TYPEORM_COLUMNS_CLOSE,
                        format!("\n    {fk}: {{\n      type: 'uuid',\n    }},"),
                    ),
                    warnings,
                )?;
            }
            OrmProfile::Mongoose => {
                apply_or_warn(
                    sink,
                    &path,
                    &TextPatch::insert_before(
                        anchors::MONGOOSE_FIELDS_CLOSE,
                        format!("\n    {fk}: {{ type: String, required: true }},"),
                    ),
                    warnings,
                )?;
            }
            OrmProfile::Prisma => {}
        }
    }

    if config.orm == OrmProfile::Prisma {
        patch_prisma_model(sink, ownership, warnings)?;
    }
    Ok(())
}

/// Appends `{fk} String` to the owner's model block in `schema.prisma`.
fn patch_prisma_model(
    sink: &mut dyn ArtifactSink,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let fk = &ownership.fk_field;
    let Some(content) = sink.read_file(layout::PRISMA_SCHEMA_FILE)? else {
        warnings.push(GenerationWarning::TargetMissing {
            path: layout::PRISMA_SCHEMA_FILE.to_string(),
        });
        return Ok(());
    };
    if content.contains(&format!("  {fk} String")) {
        warnings.push(GenerationWarning::AlreadyPatched {
            path: layout::PRISMA_SCHEMA_FILE.to_string(),
            field: fk.clone(),
        });
        return Ok(());
    }
    let model = to_pascal_case(&ownership.owner);
    apply_or_warn(
        sink,
        layout::PRISMA_SCHEMA_FILE,
        &TextPatch::insert_after(anchors::prisma_model_open(&model), format!("\n  {fk} String")),
        warnings,
    )
}

/// Adds the reciprocal field to the non-owner's domain entity: an import
/// of the owner class, a defaulted constructor parameter, a getter, and a
/// `serialize()` entry that recurses into the owned side.
fn patch_related_entity(
    sink: &mut dyn ArtifactSink,
    config: &GeneratorConfig,
    ownership: &Ownership,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let related = ModuleLayout::new(&ownership.related, config.architecture);
    let owner = ModuleLayout::new(&ownership.owner, config.architecture);
    let path = related.entity_file();
    let Some(content) = sink.read_file(&path)? else {
        warnings.push(GenerationWarning::TargetMissing { path });
        return Ok(());
    };
    let field = ownership.reciprocal_field();
    if content.contains(&format!("_{field}")) {
        warnings.push(GenerationWarning::AlreadyPatched { path, field });
        return Ok(());
    }

    let owner_class = to_pascal_case(&ownership.owner);
    let owner_var = to_camel_case(&ownership.owner);
    let (ty, default, entry) = match ownership.reciprocal {
        Reciprocal::Collection => (
            format!("{owner_class}[]"),
            "[]",
            format!("this._{field}.map(({owner_var}) => {owner_var}.serialize())"),
        ),
        Reciprocal::Reference => (
            format!("{owner_class} | null"),
            "null",
            format!("this._{field} ? this._{field}.serialize() : null"),
        ),
    };

    let specifier = layout::import_specifier(&path, &owner.entity_file());
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_after(
            FILE_BANNER,
            format!("import {{ {owner_class} }} from '{specifier}';\n"),
        ),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(
            anchors::CONSTRUCTOR_CLOSE,
            format!("\n    private _{field}: {ty} = {default},"),
        ),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(
            anchors::SERIALIZE_OPEN,
            format!("\n  get {field}(): {ty} {{\n    return this._{field};\n  }}\n"),
        ),
        warnings,
    )?;
    apply_or_warn(
        sink,
        &path,
        &TextPatch::insert_before(anchors::OBJECT_RETURN_CLOSE, format!("\n      {field}: {entry},")),
        warnings,
    )
}

/// Merges `names` into the target file's single-line named import from
/// `module`, or inserts a fresh import line after the banner when the
/// module is not imported yet. Already-present names are left alone.
fn merge_named_import(
    sink: &mut dyn ArtifactSink,
    path: &str,
    module: &str,
    names: &[&str],
    warnings: &mut Vec<GenerationWarning>,
) -> Result<(), GeneratorError> {
    let Some(content) = sink.read_file(path)? else {
        return Ok(());
    };
    match import_merge_patch(&content, module, names) {
        Some(patch) => apply_or_warn(sink, path, &patch, warnings),
        None => Ok(()),
    }
}

fn import_merge_patch(content: &str, module: &str, names: &[&str]) -> Option<TextPatch> {
    let suffix = format!("from '{module}';");
    let Some(line) = content
        .lines()
        .find(|line| line.starts_with("import {") && line.trim_end().ends_with(&suffix))
    else {
        let fresh = format!("import {{ {} }} from '{module}';\n", names.join(", "));
        return Some(TextPatch::insert_after(FILE_BANNER, fresh));
    };

    let open = line.find('{')?;
    let close = line.rfind('}')?;
    let mut merged: Vec<String> = line[open + 1..close]
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    let before = merged.len();
    for name in names {
        if !merged.iter().any(|existing| existing == name) {
            merged.push((*name).to_string());
        }
    }
    if merged.len() == before {
        return None;
    }
    merged.sort();
    Some(TextPatch::replace(
        line.to_string(),
        format!("import {{ {} }} from '{module}';", merged.join(", ")),
    ))
}
