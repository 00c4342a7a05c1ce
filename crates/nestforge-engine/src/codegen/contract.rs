//! Repository contract generation: the abstract interface plus its
//! injection token. Concrete ORM repositories implement the interface and
//! the wiring module binds them to the token.

use crate::model::Entity;
use crate::naming::{to_constant_case, to_pascal_case};

use super::layout::{import_specifier, ModuleLayout};
use super::FILE_BANNER;

/// Injection token constant for an entity's repository contract.
pub fn repository_token(entity_name: &str) -> String {
    format!("{}_REPOSITORY", to_constant_case(entity_name))
}

/// Renders the repository interface and its `Symbol` token.
pub fn generate_contract(entity: &Entity, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let token = repository_token(&entity.name);
    let contract_file = layout.contract_file();
    let entity_import = import_specifier(&contract_file, &layout.entity_file());
    let create_import = import_specifier(&contract_file, &layout.create_dto_file());
    let update_import = import_specifier(&contract_file, &layout.update_dto_file());

    let find_by_email = if entity.is_principal {
        format!("  findByEmail(email: string): Promise<{pascal} | null>;\n")
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}import {{ {pascal} }} from '{entity_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';

export const {token} = Symbol('{token}');

export interface {pascal}Repository {{
  create(dto: Create{pascal}Dto): Promise<{pascal}>;
  findAll(): Promise<{pascal}[]>;
  findById(id: string): Promise<{pascal} | null>;
{find_by_email}  update(id: string, dto: Update{pascal}Dto): Promise<{pascal} | null>;
  delete(id: string): Promise<boolean>;
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchitectureMode;
    use crate::model::FieldType;

    #[test]
    fn test_interface_surface() {
        let entity = Entity::new("post").with_field("title", FieldType::String);
        let layout = ModuleLayout::new("post", ArchitectureMode::Full);
        let code = generate_contract(&entity, &layout);
        assert!(code.contains("export const POST_REPOSITORY = Symbol('POST_REPOSITORY');"));
        assert!(code.contains("export interface PostRepository {"));
        assert!(code.contains("  create(dto: CreatePostDto): Promise<Post>;"));
        assert!(code.contains("  findById(id: string): Promise<Post | null>;"));
        assert!(code.contains("  delete(id: string): Promise<boolean>;"));
        assert!(!code.contains("findByEmail"));
    }

    #[test]
    fn test_principal_gains_find_by_email() {
        let user = Entity::new("user")
            .with_field("email", FieldType::String)
            .principal();
        let layout = ModuleLayout::new("user", ArchitectureMode::Full);
        let code = generate_contract(&user, &layout);
        assert!(code.contains("  findByEmail(email: string): Promise<User | null>;"));
    }

    #[test]
    fn test_token_uses_constant_case() {
        assert_eq!(repository_token("blog_post"), "BLOG_POST_REPOSITORY");
        assert_eq!(repository_token("user"), "USER_REPOSITORY");
    }

    #[test]
    fn test_imports_resolve_across_layers() {
        let entity = Entity::new("post");
        let layout = ModuleLayout::new("post", ArchitectureMode::Full);
        let code = generate_contract(&entity, &layout);
        assert!(code.contains("import { Post } from '../entities/post.entity';"));
        assert!(code.contains(
            "import { CreatePostDto } from '../../application/dtos/create-post.dto';"
        ));
    }
}
