//! Project frame scaffolding: everything around the entity modules.
//!
//! These are plain templates with no relation logic. `scaffold_project`
//! produces the full frame for a fresh project; `generate_app_module` is
//! also used on its own by the orchestrator when a root wiring file is
//! missing at registration time.

use std::collections::BTreeMap;

use crate::config::{GeneratorConfig, OrmProfile};
use crate::naming::to_snake_case;

use super::layout::{
    APP_MODULE_FILE, MAIN_FILE, PRISMA_MODULE_FILE, PRISMA_SCHEMA_FILE, PRISMA_SERVICE_FILE,
};
use super::schema::prisma_schema_header;
use super::{GeneratedCode, FILE_BANNER};

/// Renders the complete non-entity project frame.
pub fn scaffold_project(name: &str, config: &GeneratorConfig) -> GeneratedCode {
    let mut files = vec![
        ("package.json".to_string(), generate_package_json(name, config)),
        ("tsconfig.json".to_string(), generate_tsconfig()),
        ("nest-cli.json".to_string(), generate_nest_cli()),
        (".env".to_string(), generate_env(name, config)),
        (".env.example".to_string(), generate_env(name, config)),
        (".gitignore".to_string(), generate_gitignore()),
        ("README.md".to_string(), generate_readme(name, config)),
        (MAIN_FILE.to_string(), generate_main(name, config)),
        (APP_MODULE_FILE.to_string(), generate_app_module(config)),
    ];
    if config.orm == OrmProfile::Prisma {
        files.push((PRISMA_SCHEMA_FILE.to_string(), prisma_schema_header()));
        files.push((PRISMA_SERVICE_FILE.to_string(), generate_prisma_service()));
        files.push((PRISMA_MODULE_FILE.to_string(), generate_prisma_module()));
    }
    if config.docker {
        files.push(("Dockerfile".to_string(), generate_dockerfile()));
        files.push((
            "docker-compose.yml".to_string(),
            generate_docker_compose(name, config),
        ));
    }
    GeneratedCode { files }
}

/// Renders the root wiring module with the per-ORM connection bootstrap.
/// Entity modules are registered into its `imports` array afterwards.
pub fn generate_app_module(config: &GeneratorConfig) -> String {
    let (orm_import, connection) = match config.orm {
        OrmProfile::TypeOrm => (
            "import { TypeOrmModule } from '@nestjs/typeorm';",
            "    TypeOrmModule.forRoot({\n      type: 'postgres',\n      url: process.env.DATABASE_URL,\n      autoLoadEntities: true,\n      synchronize: true,\n    }),",
        ),
        OrmProfile::Mongoose => (
            "import { MongooseModule } from '@nestjs/mongoose';",
            "    MongooseModule.forRoot(process.env.DATABASE_URL ?? 'mongodb://localhost:27017/app'),",
        ),
        OrmProfile::Prisma => (
            "import { PrismaModule } from './prisma/prisma.module';",
            "    PrismaModule,",
        ),
    };

    format!(
        r#"{FILE_BANNER}import {{ Module }} from '@nestjs/common';
import {{ ConfigModule }} from '@nestjs/config';
{orm_import}

@Module({{
  imports: [
    ConfigModule.forRoot({{ isGlobal: true }}),
{connection}
  ],
  controllers: [],
  providers: [],
}})
export class AppModule {{}}
"#
    )
}

/// Renders the entrypoint, with a Swagger bootstrap when docs are enabled.
pub fn generate_main(name: &str, config: &GeneratorConfig) -> String {
    let swagger_import = if config.api_docs {
        "import { DocumentBuilder, SwaggerModule } from '@nestjs/swagger';\n"
    } else {
        ""
    };
    let swagger_setup = if config.api_docs {
        format!(
            r#"
  const config = new DocumentBuilder()
    .setTitle('{name}')
    .setDescription('Generated API documentation')
    .setVersion('1.0')
    .build();
  const document = SwaggerModule.createDocument(app, config);
  SwaggerModule.setup('docs', app, document);
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{FILE_BANNER}import {{ ValidationPipe }} from '@nestjs/common';
import {{ NestFactory }} from '@nestjs/core';
{swagger_import}import {{ AppModule }} from './app.module';

async function bootstrap() {{
  const app = await NestFactory.create(AppModule);
  app.useGlobalPipes(new ValidationPipe({{ whitelist: true, transform: true }}));
{swagger_setup}  await app.listen(process.env.PORT ?? 3000);
}}

bootstrap();
"#
    )
}

/// Renders the shared Prisma connection service.
pub fn generate_prisma_service() -> String {
    format!(
        r#"{FILE_BANNER}import {{ Injectable, OnModuleDestroy, OnModuleInit }} from '@nestjs/common';
import {{ PrismaClient }} from '@prisma/client';

@Injectable()
export class PrismaService extends PrismaClient implements OnModuleInit, OnModuleDestroy {{
  async onModuleInit() {{
    await this.$connect();
  }}

  async onModuleDestroy() {{
    await this.$disconnect();
  }}
}}
"#
    )
}

/// Renders the global Prisma wiring module.
pub fn generate_prisma_module() -> String {
    format!(
        r#"{FILE_BANNER}import {{ Global, Module }} from '@nestjs/common';
import {{ PrismaService }} from './prisma.service';

@Global()
@Module({{
  providers: [PrismaService],
  exports: [PrismaService],
}})
export class PrismaModule {{}}
"#
    )
}

fn generate_package_json(name: &str, config: &GeneratorConfig) -> String {
    let mut deps = BTreeMap::new();
    deps.insert("@nestjs/common", "^10.3.0");
    deps.insert("@nestjs/config", "^3.1.1");
    deps.insert("@nestjs/core", "^10.3.0");
    deps.insert("@nestjs/platform-express", "^10.3.0");
    deps.insert("class-transformer", "^0.5.1");
    deps.insert("class-validator", "^0.14.1");
    deps.insert("reflect-metadata", "^0.2.1");
    deps.insert("rxjs", "^7.8.1");
    match config.orm {
        OrmProfile::TypeOrm => {
            deps.insert("@nestjs/typeorm", "^10.0.1");
            deps.insert("pg", "^8.11.3");
            deps.insert("typeorm", "^0.3.20");
        }
        OrmProfile::Mongoose => {
            deps.insert("@nestjs/mongoose", "^10.0.2");
            deps.insert("mongoose", "^8.1.1");
        }
        OrmProfile::Prisma => {
            deps.insert("@prisma/client", "^5.9.1");
        }
    }
    if config.api_docs {
        deps.insert("@nestjs/swagger", "^7.2.0");
    }

    let mut dev_deps = BTreeMap::new();
    dev_deps.insert("@nestjs/cli", "^10.3.0");
    dev_deps.insert("@types/express", "^4.17.21");
    dev_deps.insert("@types/node", "^20.11.0");
    dev_deps.insert("ts-node", "^10.9.2");
    dev_deps.insert("typescript", "^5.3.3");
    if config.orm == OrmProfile::Prisma {
        dev_deps.insert("prisma", "^5.9.1");
    }

    let mut scripts = BTreeMap::new();
    scripts.insert("build", "nest build");
    scripts.insert("start", "nest start");
    scripts.insert("start:dev", "nest start --watch");
    scripts.insert("start:prod", "node dist/main");
    if config.orm == OrmProfile::Prisma {
        scripts.insert("prisma:generate", "prisma generate");
    }

    let package = serde_json::json!({
        "name": name,
        "version": "0.0.1",
        "description": "Backend scaffolded by nestforge",
        "private": true,
        "scripts": scripts,
        "dependencies": deps,
        "devDependencies": dev_deps,
    });
    let mut text = serde_json::to_string_pretty(&package).unwrap_or_default();
    text.push('\n');
    text
}

fn generate_tsconfig() -> String {
    r#"{
  "compilerOptions": {
    "module": "commonjs",
    "declaration": true,
    "removeComments": true,
    "emitDecoratorMetadata": true,
    "experimentalDecorators": true,
    "allowSyntheticDefaultImports": true,
    "target": "ES2021",
    "sourceMap": true,
    "outDir": "./dist",
    "baseUrl": "./",
    "incremental": true,
    "skipLibCheck": true,
    "strictNullChecks": true,
    "forceConsistentCasingInFileNames": true
  }
}
"#
    .to_string()
}

fn generate_nest_cli() -> String {
    r#"{
  "$schema": "https://json.schemastore.org/nest-cli",
  "collection": "@nestjs/schematics",
  "sourceRoot": "src"
}
"#
    .to_string()
}

fn database_url(name: &str, orm: OrmProfile, host: &str) -> String {
    let db = to_snake_case(name);
    match orm {
        OrmProfile::TypeOrm | OrmProfile::Prisma => {
            format!("postgresql://postgres:postgres@{host}:5432/{db}")
        }
        OrmProfile::Mongoose => format!("mongodb://{host}:27017/{db}"),
    }
}

fn generate_env(name: &str, config: &GeneratorConfig) -> String {
    let url = database_url(name, config.orm, "localhost");
    format!("DATABASE_URL={url}\nPORT=3000\n")
}

fn generate_gitignore() -> String {
    "node_modules/\ndist/\n.env\n".to_string()
}

fn generate_readme(name: &str, config: &GeneratorConfig) -> String {
    let orm = config.orm.as_str();
    let mode = config.architecture.as_str();
    let mut extra = String::new();
    if config.orm == OrmProfile::Prisma {
        extra.push_str("npm run prisma:generate\n");
    }
    format!(
        r#"# {name}

NestJS backend scaffolded by nestforge ({orm} profile, {mode} architecture).

## Getting started

```bash
npm install
{extra}npm run start:dev
```

Copy `.env.example` to `.env` and point `DATABASE_URL` at your database.

## Generating modules

```bash
nestforge generate <entity> --fields "title:string,body:text"
```
"#
    )
}

fn generate_dockerfile() -> String {
    r#"FROM node:20-alpine AS build
WORKDIR /app
COPY package*.json ./
RUN npm ci
COPY . .
RUN npm run build

FROM node:20-alpine
WORKDIR /app
COPY --from=build /app/dist ./dist
COPY --from=build /app/node_modules ./node_modules
COPY package*.json ./
EXPOSE 3000
CMD ["node", "dist/main"]
"#
    .to_string()
}

fn generate_docker_compose(name: &str, config: &GeneratorConfig) -> String {
    let url = database_url(name, config.orm, "db");
    let db_service = match config.orm {
        OrmProfile::TypeOrm | OrmProfile::Prisma => format!(
            r#"  db:
    image: postgres:16-alpine
    environment:
      POSTGRES_USER: postgres
      POSTGRES_PASSWORD: postgres
      POSTGRES_DB: {db}
    ports:
      - '5432:5432'
    volumes:
      - db-data:/var/lib/postgresql/data
"#,
            db = to_snake_case(name)
        ),
        OrmProfile::Mongoose => r#"  db:
    image: mongo:7
    ports:
      - '27017:27017'
    volumes:
      - db-data:/data/db
"#
        .to_string(),
    };

    format!(
        r#"services:
  app:
    build: .
    ports:
      - '3000:3000'
    environment:
      DATABASE_URL: {url}
    depends_on:
      - db

{db_service}
volumes:
  db-data:
"#
    )
}
