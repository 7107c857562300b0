// Schema history, oldest first. Every statement is idempotent so a database
// created by an earlier, partially applied schema converges to the same shape.

use super::Migration;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "core_users_and_assistants",
        statements: V1_CORE,
    },
    Migration {
        version: 2,
        name: "default_local_user",
        statements: V2_DEFAULT_USER,
    },
    Migration {
        version: 3,
        name: "skills_agents_and_components",
        statements: V3_PHASE2,
    },
    Migration {
        version: 4,
        name: "conversations_and_messages",
        statements: V4_CONVERSATIONS,
    },
    Migration {
        version: 5,
        name: "updated_at_and_boolean_defaults",
        statements: V5_UPDATED_AT,
    },
    Migration {
        version: 6,
        name: "optional_vector_extension",
        statements: V6_VECTOR,
    },
    Migration {
        version: 7,
        name: "sample_catalog_data",
        statements: V7_SAMPLE_DATA,
    },
    Migration {
        version: 8,
        name: "conversation_lifecycle_columns",
        statements: V8_CONVERSATION_LIFECYCLE,
    },
];

/// Id of the user seeded by migration 2
pub const LOCAL_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

const V1_CORE: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        username VARCHAR(50) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        first_name VARCHAR(100),
        last_name VARCHAR(100),
        is_active BOOLEAN NOT NULL DEFAULT true,
        is_verified BOOLEAN NOT NULL DEFAULT false,
        last_login_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_users_is_active ON users (is_active)",
    r#"
    CREATE TABLE IF NOT EXISTS assistants (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        personality_template_id UUID,
        voice_id UUID,
        avatar_id UUID,
        default_llm_model VARCHAR(100) DEFAULT 'gemini-pro',
        custom_system_prompt TEXT,
        is_active BOOLEAN NOT NULL DEFAULT true,
        is_public BOOLEAN NOT NULL DEFAULT false,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_assistants_user_id ON assistants (user_id)",
    "CREATE INDEX IF NOT EXISTS ix_assistants_is_active ON assistants (is_active)",
    "CREATE INDEX IF NOT EXISTS ix_assistants_is_public ON assistants (is_public)",
];

const V2_DEFAULT_USER: &[&str] = &[r#"
    INSERT INTO users (id, username, email, password_hash, is_active, is_verified)
    VALUES (
        '00000000-0000-0000-0000-000000000001',
        'local_user',
        'local@example.com',
        'not_used_in_local',
        true,
        true
    )
    ON CONFLICT DO NOTHING
    "#];

const V3_PHASE2: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS skill_definitions (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID REFERENCES users (id) ON DELETE CASCADE,
        skill_code VARCHAR(10) NOT NULL,
        name VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        skill_type VARCHAR(50) NOT NULL,
        configuration JSONB NOT NULL,
        is_public BOOLEAN NOT NULL DEFAULT false,
        is_active BOOLEAN NOT NULL DEFAULT true,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assistant_skills (
        assistant_id UUID NOT NULL REFERENCES assistants (id) ON DELETE CASCADE,
        skill_definition_id UUID NOT NULL REFERENCES skill_definitions (id) ON DELETE CASCADE,
        is_enabled BOOLEAN NOT NULL DEFAULT true,
        priority INTEGER NOT NULL DEFAULT 1,
        custom_settings JSONB,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (assistant_id, skill_definition_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS agents (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(100) NOT NULL UNIQUE,
        description TEXT,
        file_path VARCHAR(255) NOT NULL UNIQUE,
        vector TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voices (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID REFERENCES users (id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        provider VARCHAR(50),
        voice_id VARCHAR(100),
        language VARCHAR(10),
        gender VARCHAR(20),
        age_group VARCHAR(20),
        description TEXT,
        sample_url VARCHAR(500),
        settings JSONB,
        is_active BOOLEAN DEFAULT true,
        is_public BOOLEAN DEFAULT false,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS avatars (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID REFERENCES users (id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        avatar_type VARCHAR(50),
        image_url VARCHAR(500),
        animated_url VARCHAR(500),
        style VARCHAR(50),
        gender VARCHAR(20),
        age_appearance VARCHAR(20),
        tags TEXT[],
        metadata JSONB,
        is_active BOOLEAN DEFAULT true,
        is_public BOOLEAN DEFAULT false,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS personality_templates (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID REFERENCES users (id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        personality_type VARCHAR(50),
        system_prompt TEXT,
        characteristics JSONB,
        is_active BOOLEAN DEFAULT true,
        is_public BOOLEAN DEFAULT false,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_preferences (
        user_id UUID PRIMARY KEY REFERENCES users (id) ON DELETE CASCADE,
        theme VARCHAR(50),
        language VARCHAR(10),
        timezone VARCHAR(50),
        notification_settings JSONB,
        privacy_settings JSONB,
        default_assistant_id UUID REFERENCES assistants (id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

const V4_CONVERSATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS conversations (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        assistant_id UUID REFERENCES assistants (id) ON DELETE CASCADE,
        title VARCHAR(200),
        conversation_type VARCHAR(50),
        status VARCHAR(50),
        voice_enabled BOOLEAN DEFAULT false,
        voice_id UUID REFERENCES voices (id) ON DELETE SET NULL,
        metadata JSONB,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_conversations_assistant_id ON conversations (assistant_id)",
    r#"
    DO $$
    BEGIN
        IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'message_role') THEN
            CREATE TYPE message_role AS ENUM ('user', 'assistant', 'system');
        END IF;
    END
    $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        conversation_id UUID NOT NULL REFERENCES conversations (id) ON DELETE CASCADE,
        role message_role NOT NULL,
        content TEXT,
        content_type VARCHAR(50),
        parent_id UUID REFERENCES messages (id) ON DELETE SET NULL,
        metadata JSONB,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_messages_conversation_id ON messages (conversation_id)",
    r#"
    CREATE TABLE IF NOT EXISTS files (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        conversation_id UUID REFERENCES conversations (id) ON DELETE SET NULL,
        message_id UUID REFERENCES messages (id) ON DELETE SET NULL,
        file_name VARCHAR(255) NOT NULL,
        file_type VARCHAR(100),
        file_size INTEGER,
        storage_path VARCHAR(500),
        mime_type VARCHAR(100),
        is_processed BOOLEAN DEFAULT false,
        metadata JSONB,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

const V5_UPDATED_AT: &[&str] = &[
    "ALTER TABLE assistants ALTER COLUMN is_active SET DEFAULT true",
    "ALTER TABLE assistants ALTER COLUMN is_public SET DEFAULT false",
    "ALTER TABLE skill_definitions ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE assistant_skills ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
];

const V6_VECTOR: &[&str] = &[r#"
    DO $$
    BEGIN
        IF EXISTS (SELECT 1 FROM pg_available_extensions WHERE name = 'vector') THEN
            EXECUTE 'CREATE EXTENSION IF NOT EXISTS "vector"';
        ELSE
            RAISE NOTICE 'pgvector extension not available on this server; skipping';
        END IF;
    END
    $$
    "#];

const V7_SAMPLE_DATA: &[&str] = &[
    r#"
    INSERT INTO personality_templates
        (id, user_id, name, description, personality_type, system_prompt, characteristics)
    VALUES
        (
            '10000000-0000-0000-0000-000000000001',
            NULL,
            'Realist',
            'Calm, observant and efficiency-minded',
            'professional',
            'Observe the situation calmly, find the essence of the problem and propose the most efficient path.',
            '{"formality": "high", "detail_level": "high"}'
        ),
        (
            '10000000-0000-0000-0000-000000000002',
            NULL,
            'Companion',
            'Easygoing on the surface, firm when it matters',
            'friendly',
            'Respond warmly and casually, but stand firm on important decisions.',
            '{"formality": "low", "detail_level": "medium"}'
        )
    ON CONFLICT (id) DO NOTHING
    "#,
    r#"
    INSERT INTO skill_definitions
        (id, skill_code, name, description, skill_type, configuration, is_public)
    VALUES
        (
            '20000000-0000-0000-0000-000000000001',
            'ANALYSIS',
            'Data Analysis',
            'Extract insight from complex data',
            'analysis',
            '{"keywords": ["analysis", "analyze", "data", "report", "forecast", "sales"], "preferred": "claude-3-opus", "fallback": ["gemini-pro"]}',
            true
        ),
        (
            '20000000-0000-0000-0000-000000000002',
            'RESEARCH',
            'Web Research',
            'Collect and summarize information from the web',
            'research',
            '{"keywords": ["research", "search", "summarize", "summary", "web", "news"], "preferred": "gemini-pro", "fallback": ["gpt-4-turbo"]}',
            true
        ),
        (
            '20000000-0000-0000-0000-000000000003',
            'CREATIVE',
            'Creative Planning',
            'Produce new ideas and writing',
            'creative',
            '{"keywords": ["write", "draft", "idea", "ideas", "story", "plan"], "preferred": "gpt-4-turbo", "fallback": []}',
            true
        )
    ON CONFLICT (id) DO NOTHING
    "#,
    r#"
    INSERT INTO agents (id, name, description, file_path)
    VALUES
        (
            '30000000-0000-0000-0000-000000000001',
            'default',
            'General purpose assistant',
            'agents/system/default.md'
        ),
        (
            '30000000-0000-0000-0000-000000000002',
            'analyst',
            'Data analysis, forecasting and report writing',
            'agents/analysis/report.md'
        ),
        (
            '30000000-0000-0000-0000-000000000003',
            'researcher',
            'Web research, search and summarization',
            'agents/research/web.md'
        )
    ON CONFLICT DO NOTHING
    "#,
];

const V8_CONVERSATION_LIFECYCLE: &[&str] = &[
    "ALTER TABLE conversations ADD COLUMN IF NOT EXISTS started_at TIMESTAMPTZ NULL",
    "ALTER TABLE conversations ADD COLUMN IF NOT EXISTS ended_at TIMESTAMPTZ NULL",
];
