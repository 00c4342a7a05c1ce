//! REST controller generation.
//!
//! Routes return `serialize()` output rather than entity instances, which
//! keeps the domain class out of the presentation layer and sidesteps the
//! name clash between an entity called `post` and the `@Post()` route
//! decorator. Principal entities omit the create route; account creation
//! is expected to flow through a registration endpoint instead.

use crate::config::GeneratorConfig;
use crate::model::Entity;
use crate::naming::{pluralize, to_camel_case, to_kebab_case, to_pascal_case};

use super::layout::{import_specifier, ModuleLayout};
use super::FILE_BANNER;

/// Renders the controller for an entity.
pub fn generate_controller(
    entity: &Entity,
    config: &GeneratorConfig,
    layout: &ModuleLayout,
) -> String {
    let pascal = to_pascal_case(&entity.name);
    let camel = to_camel_case(&entity.name);
    let plural = pluralize(&camel);
    let route = pluralize(&to_kebab_case(&entity.name));
    let human = to_kebab_case(&entity.name).replace('-', " ");
    let service = format!("{camel}Service");

    let controller_file = layout.controller_file();
    let create_import = import_specifier(&controller_file, &layout.create_dto_file());
    let update_import = import_specifier(&controller_file, &layout.update_dto_file());
    let service_import = import_specifier(&controller_file, &layout.service_file());

    let mut common = vec!["Body", "Controller", "Delete", "Get", "Param"];
    if !entity.is_principal {
        common.push("Post");
    }
    common.push("Put");
    common.sort_unstable();

    let mut imports = format!(
        "import {{ {} }} from '@nestjs/common';\n",
        common.join(", ")
    );
    if config.api_docs {
        imports.push_str("import { ApiOperation, ApiTags } from '@nestjs/swagger';\n");
    }
    if !entity.is_principal {
        imports.push_str(&format!(
            "import {{ Create{pascal}Dto }} from '{create_import}';\n"
        ));
    }
    imports.push_str(&format!(
        "import {{ Update{pascal}Dto }} from '{update_import}';\n"
    ));
    imports.push_str(&format!("import {{ {pascal}Service }} from '{service_import}';\n"));

    let operation = |summary: String| {
        if config.api_docs {
            format!("  @ApiOperation({{ summary: '{summary}' }})\n")
        } else {
            String::new()
        }
    };

    let mut routes = Vec::new();
    if !entity.is_principal {
        let docs = operation(format!("Create a {human}"));
        routes.push(format!(
            "  @Post()\n{docs}  async create(@Body() dto: Create{pascal}Dto) {{\n    const {camel} = await this.{service}.create(dto);\n    return {camel}.serialize();\n  }}"
        ));
    }
    let docs = operation(format!("List all {}", pluralize(&human)));
    routes.push(format!(
        "  @Get()\n{docs}  async findAll() {{\n    const {plural} = await this.{service}.findAll();\n    return {plural}.map(({camel}) => {camel}.serialize());\n  }}"
    ));
    let docs = operation(format!("Find a {human} by id"));
    routes.push(format!(
        "  @Get(':id')\n{docs}  async findById(@Param('id') id: string) {{\n    const {camel} = await this.{service}.findById(id);\n    return {camel}.serialize();\n  }}"
    ));
    let docs = operation(format!("Update a {human}"));
    routes.push(format!(
        "  @Put(':id')\n{docs}  async update(@Param('id') id: string, @Body() dto: Update{pascal}Dto) {{\n    const {camel} = await this.{service}.update(id, dto);\n    return {camel}.serialize();\n  }}"
    ));
    let docs = operation(format!("Delete a {human}"));
    routes.push(format!(
        "  @Delete(':id')\n{docs}  async delete(@Param('id') id: string) {{\n    await this.{service}.delete(id);\n    return {{ deleted: true }};\n  }}"
    ));
    let routes = routes.join("\n\n");

    let tags = if config.api_docs {
        format!("@ApiTags('{route}')\n")
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}{imports}
{tags}@Controller('{route}')
export class {pascal}Controller {{
  constructor(private readonly {service}: {pascal}Service) {{}}

{routes}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchitectureMode;
    use crate::model::FieldType;

    fn post() -> Entity {
        Entity::new("post").with_field("title", FieldType::String)
    }

    fn layout() -> ModuleLayout {
        ModuleLayout::new("post", ArchitectureMode::Full)
    }

    #[test]
    fn test_standard_routes() {
        let code = generate_controller(&post(), &GeneratorConfig::default(), &layout());
        assert!(code.contains("@Controller('posts')"));
        assert!(code.contains("export class PostController {"));
        assert!(code.contains("  @Post()\n  async create(@Body() dto: CreatePostDto) {"));
        assert!(code.contains("  @Get()\n  async findAll() {"));
        assert!(code.contains("  @Get(':id')\n  async findById(@Param('id') id: string) {"));
        assert!(code.contains("  @Put(':id')"));
        assert!(code.contains("  @Delete(':id')"));
        assert!(code.contains("return { deleted: true };"));
    }

    #[test]
    fn test_routes_return_serialized_records() {
        let code = generate_controller(&post(), &GeneratorConfig::default(), &layout());
        assert!(code.contains("return post.serialize();"));
        assert!(code.contains("return posts.map((post) => post.serialize());"));
        // The domain class itself is never imported here.
        assert!(!code.contains("from '../../domain/entities/post.entity'"));
    }

    #[test]
    fn test_principal_omits_create_route() {
        let user = Entity::new("user")
            .with_field("email", FieldType::String)
            .principal();
        let code = generate_controller(
            &user,
            &GeneratorConfig::default(),
            &ModuleLayout::new("user", ArchitectureMode::Full),
        );
        assert!(!code.contains("async create("));
        assert!(!code.contains("CreateUserDto"));
        assert!(code.contains("import { Body, Controller, Delete, Get, Param, Put } from '@nestjs/common';"));
        assert!(code.contains("async update("));
    }

    #[test]
    fn test_api_docs_annotations() {
        let config = GeneratorConfig {
            api_docs: true,
            ..GeneratorConfig::default()
        };
        let code = generate_controller(&post(), &config, &layout());
        assert!(code.contains("import { ApiOperation, ApiTags } from '@nestjs/swagger';"));
        assert!(code.contains("@ApiTags('posts')\n@Controller('posts')"));
        assert!(code.contains("  @Post()\n  @ApiOperation({ summary: 'Create a post' })\n"));
        assert!(code.contains("@ApiOperation({ summary: 'List all posts' })"));
    }

    #[test]
    fn test_multi_word_route_path() {
        let entity = Entity::new("blog_post").with_field("title", FieldType::String);
        let config = GeneratorConfig {
            api_docs: true,
            ..GeneratorConfig::default()
        };
        let code = generate_controller(
            &entity,
            &config,
            &ModuleLayout::new("blog_post", ArchitectureMode::Full),
        );
        assert!(code.contains("@Controller('blog-posts')"));
        assert!(code.contains("@ApiOperation({ summary: 'Update a blog post' })"));
    }
}
