//! Concrete repository generation, one implementation per ORM profile.
//!
//! All three profiles implement the same contract surface: `create`,
//! `findAll`, `findById` (null on miss, never a throw), `update`, `delete`,
//! and `findByEmail` for principal entities. Every read passes through the
//! mapper's record-to-domain direction so the rest of the project only sees
//! domain entities.

use crate::config::{GeneratorConfig, OrmProfile};
use crate::model::Entity;
use crate::naming::{to_camel_case, to_pascal_case};

use super::layout::{import_specifier, ModuleLayout, PRISMA_SERVICE_FILE};
use super::FILE_BANNER;

/// Class name of the concrete repository for an entity under a profile.
pub fn repository_class(entity_name: &str, orm: OrmProfile) -> String {
    format!(
        "{}{}Repository",
        to_pascal_case(orm.as_str()),
        to_pascal_case(entity_name)
    )
}

/// Renders the concrete repository for the configured profile.
pub fn generate_repository(
    entity: &Entity,
    config: &GeneratorConfig,
    layout: &ModuleLayout,
) -> String {
    match config.orm {
        OrmProfile::TypeOrm => typeorm_repository(entity, layout),
        OrmProfile::Mongoose => mongoose_repository(entity, layout),
        OrmProfile::Prisma => prisma_repository(entity, layout),
    }
}

struct RepoImports {
    entity: String,
    contract: String,
    create_dto: String,
    update_dto: String,
    mapper: String,
    record: String,
}

fn repo_imports(layout: &ModuleLayout, orm: OrmProfile) -> RepoImports {
    let repo_file = layout.repository_file(orm);
    RepoImports {
        entity: import_specifier(&repo_file, &layout.entity_file()),
        contract: import_specifier(&repo_file, &layout.contract_file()),
        create_dto: import_specifier(&repo_file, &layout.create_dto_file()),
        update_dto: import_specifier(&repo_file, &layout.update_dto_file()),
        mapper: import_specifier(&repo_file, &layout.mapper_file()),
        record: import_specifier(&repo_file, &layout.schema_file(orm)),
    }
}

fn typeorm_repository(entity: &Entity, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let class_name = repository_class(&entity.name, OrmProfile::TypeOrm);
    let imports = repo_imports(layout, OrmProfile::TypeOrm);
    let RepoImports {
        entity: entity_import,
        contract: contract_import,
        create_dto: create_import,
        update_dto: update_import,
        mapper: mapper_import,
        record: record_import,
    } = imports;

    let find_by_email = if entity.is_principal {
        format!(
            r#"
  async findByEmail(email: string): Promise<{pascal} | null> {{
    const record = await this.repository.findOne({{ where: {{ email }} }});
    return record ? {pascal}Mapper.toDomain(record) : null;
  }}
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}import {{ Injectable }} from '@nestjs/common';
import {{ InjectRepository }} from '@nestjs/typeorm';
import {{ Repository }} from 'typeorm';
import {{ {pascal} }} from '{entity_import}';
import {{ {pascal}Repository }} from '{contract_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';
import {{ {pascal}Mapper }} from '{mapper_import}';
import {{ {pascal}Record, {pascal}Schema }} from '{record_import}';

@Injectable()
export class {class_name} implements {pascal}Repository {{
  constructor(
    @InjectRepository({pascal}Schema)
    private readonly repository: Repository<{pascal}Record>,
  ) {{}}

  async create(dto: Create{pascal}Dto): Promise<{pascal}> {{
    const record = await this.repository.save({pascal}Mapper.toPersistence(dto));
    return {pascal}Mapper.toDomain(record as {pascal}Record);
  }}

  async findAll(): Promise<{pascal}[]> {{
    const records = await this.repository.find();
    return records.map((record) => {pascal}Mapper.toDomain(record));
  }}

  async findById(id: string): Promise<{pascal} | null> {{
    const record = await this.repository.findOne({{ where: {{ id }} }});
    return record ? {pascal}Mapper.toDomain(record) : null;
  }}
{find_by_email}
  async update(id: string, dto: Update{pascal}Dto): Promise<{pascal} | null> {{
    await this.repository.update(id, {pascal}Mapper.toPartialPersistence(dto));
    return this.findById(id);
  }}

  async delete(id: string): Promise<boolean> {{
    const result = await this.repository.delete(id);
    return (result.affected ?? 0) > 0;
  }}
}}
"#
    )
}

fn mongoose_repository(entity: &Entity, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let class_name = repository_class(&entity.name, OrmProfile::Mongoose);
    let RepoImports {
        entity: entity_import,
        contract: contract_import,
        create_dto: create_import,
        update_dto: update_import,
        mapper: mapper_import,
        record: record_import,
    } = repo_imports(layout, OrmProfile::Mongoose);

    let find_by_email = if entity.is_principal {
        format!(
            r#"
  async findByEmail(email: string): Promise<{pascal} | null> {{
    const document = await this.model.findOne({{ email }}).exec();
    return document ? {pascal}Mapper.toDomain(this.toRecord(document)) : null;
  }}
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}import {{ Injectable }} from '@nestjs/common';
import {{ InjectModel }} from '@nestjs/mongoose';
import {{ HydratedDocument, Model }} from 'mongoose';
import {{ {pascal} }} from '{entity_import}';
import {{ {pascal}Repository }} from '{contract_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';
import {{ {pascal}Mapper }} from '{mapper_import}';
import {{ {pascal}Record }} from '{record_import}';

@Injectable()
export class {class_name} implements {pascal}Repository {{
  constructor(
    @InjectModel('{pascal}')
    private readonly model: Model<{pascal}Record>,
  ) {{}}

  async create(dto: Create{pascal}Dto): Promise<{pascal}> {{
    const document = await this.model.create({pascal}Mapper.toPersistence(dto));
    return {pascal}Mapper.toDomain(this.toRecord(document));
  }}

  async findAll(): Promise<{pascal}[]> {{
    const documents = await this.model.find().exec();
    return documents.map((document) => {pascal}Mapper.toDomain(this.toRecord(document)));
  }}

  async findById(id: string): Promise<{pascal} | null> {{
    const document = await this.model.findById(id).exec();
    return document ? {pascal}Mapper.toDomain(this.toRecord(document)) : null;
  }}
{find_by_email}
  async update(id: string, dto: Update{pascal}Dto): Promise<{pascal} | null> {{
    const document = await this.model
      .findByIdAndUpdate(id, {pascal}Mapper.toPartialPersistence(dto), {{ new: true }})
      .exec();
    return document ? {pascal}Mapper.toDomain(this.toRecord(document)) : null;
  }}

  async delete(id: string): Promise<boolean> {{
    const result = await this.model.findByIdAndDelete(id).exec();
    return result !== null;
  }}

  private toRecord(document: HydratedDocument<{pascal}Record>): {pascal}Record {{
    return {{ ...document.toObject(), id: document.id }};
  }}
}}
"#
    )
}

fn prisma_repository(entity: &Entity, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let camel = to_camel_case(&entity.name);
    let class_name = repository_class(&entity.name, OrmProfile::Prisma);
    let repo_file = layout.repository_file(OrmProfile::Prisma);
    let service_import = import_specifier(&repo_file, PRISMA_SERVICE_FILE);
    let RepoImports {
        entity: entity_import,
        contract: contract_import,
        create_dto: create_import,
        update_dto: update_import,
        mapper: mapper_import,
        record: record_import,
    } = repo_imports(layout, OrmProfile::Prisma);

    let find_by_email = if entity.is_principal {
        format!(
            r#"
  async findByEmail(email: string): Promise<{pascal} | null> {{
    const record = await this.prisma.{camel}.findFirst({{ where: {{ email }} }});
    return record ? {pascal}Mapper.toDomain(record as {pascal}Record) : null;
  }}
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}import {{ Injectable }} from '@nestjs/common';
import {{ PrismaService }} from '{service_import}';
import {{ {pascal} }} from '{entity_import}';
import {{ {pascal}Repository }} from '{contract_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';
import {{ {pascal}Mapper }} from '{mapper_import}';
import {{ {pascal}Record }} from '{record_import}';

@Injectable()
export class {class_name} implements {pascal}Repository {{
  constructor(private readonly prisma: PrismaService) {{}}

  async create(dto: Create{pascal}Dto): Promise<{pascal}> {{
    const record = await this.prisma.{camel}.create({{
      data: {pascal}Mapper.toPersistence(dto),
    }});
    return {pascal}Mapper.toDomain(record as {pascal}Record);
  }}

  async findAll(): Promise<{pascal}[]> {{
    const records = await this.prisma.{camel}.findMany();
    return records.map((record) => {pascal}Mapper.toDomain(record as {pascal}Record));
  }}

  async findById(id: string): Promise<{pascal} | null> {{
    const record = await this.prisma.{camel}.findUnique({{ where: {{ id }} }});
    return record ? {pascal}Mapper.toDomain(record as {pascal}Record) : null;
  }}
{find_by_email}
  async update(id: string, dto: Update{pascal}Dto): Promise<{pascal} | null> {{
    const existing = await this.prisma.{camel}.findUnique({{ where: {{ id }} }});
    if (!existing) {{
      return null;
    }}
    const record = await this.prisma.{camel}.update({{
      where: {{ id }},
      data: {pascal}Mapper.toPartialPersistence(dto),
    }});
    return {pascal}Mapper.toDomain(record as {pascal}Record);
  }}

  async delete(id: string): Promise<boolean> {{
    const result = await this.prisma.{camel}.deleteMany({{ where: {{ id }} }});
    return result.count > 0;
  }}
}}
"#
    )
}
