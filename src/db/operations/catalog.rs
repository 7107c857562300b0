use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::Result;
use crate::models::{
    Agent, AssistantSkill, AssistantSkillUpdate, Avatar, EnabledSkill, PersonalityTemplate,
    SkillDefinition, Voice,
};

const SKILL_COLUMNS: &str = "sd.id, sd.user_id, sd.skill_code, sd.name, sd.description, \
     sd.skill_type, sd.configuration, sd.is_public, sd.is_active, sd.created_at, sd.updated_at";

fn parse_skill_row(row: &Row) -> Result<SkillDefinition> {
    Ok(SkillDefinition {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        skill_code: row.try_get("skill_code")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        skill_type: row.try_get("skill_type")?,
        configuration: row.try_get("configuration")?,
        is_public: row.try_get("is_public")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_assistant_skill_row(row: &Row) -> Result<AssistantSkill> {
    Ok(AssistantSkill {
        assistant_id: row.try_get("assistant_id")?,
        skill_definition_id: row.try_get("skill_definition_id")?,
        is_enabled: row.try_get("is_enabled")?,
        priority: row.try_get("priority")?,
        custom_settings: row.try_get("custom_settings")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_agent_row(row: &Row) -> Result<Agent> {
    Ok(Agent {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        file_path: row.try_get("file_path")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_personality_template_row(row: &Row) -> Result<PersonalityTemplate> {
    Ok(PersonalityTemplate {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        personality_type: row.try_get("personality_type")?,
        system_prompt: row.try_get("system_prompt")?,
        characteristics: row.try_get("characteristics")?,
        is_active: row.try_get("is_active")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_voice_row(row: &Row) -> Result<Voice> {
    Ok(Voice {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        provider: row.try_get("provider")?,
        voice_id: row.try_get("voice_id")?,
        language: row.try_get("language")?,
        gender: row.try_get("gender")?,
        age_group: row.try_get("age_group")?,
        description: row.try_get("description")?,
        sample_url: row.try_get("sample_url")?,
        settings: row.try_get("settings")?,
        is_active: row.try_get("is_active")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_avatar_row(row: &Row) -> Result<Avatar> {
    Ok(Avatar {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        avatar_type: row.try_get("avatar_type")?,
        image_url: row.try_get("image_url")?,
        animated_url: row.try_get("animated_url")?,
        style: row.try_get("style")?,
        gender: row.try_get("gender")?,
        age_appearance: row.try_get("age_appearance")?,
        tags: row.try_get("tags")?,
        metadata: row.try_get("metadata")?,
        is_active: row.try_get("is_active")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Active skill definitions, system ones included
pub async fn list_skill_definitions(pool: &Pool) -> Result<Vec<SkillDefinition>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM skill_definitions sd WHERE sd.is_active ORDER BY sd.skill_code, sd.name",
        SKILL_COLUMNS
    );
    let rows = conn.query(&sql, &[]).await?;
    rows.iter().map(parse_skill_row).collect()
}

pub async fn get_skill_definition(pool: &Pool, id: Uuid) -> Result<Option<SkillDefinition>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM skill_definitions sd WHERE sd.id = $1",
        SKILL_COLUMNS
    );
    let row = conn.query_opt(&sql, &[&id]).await?;
    row.as_ref().map(parse_skill_row).transpose()
}

/// Enabled, active skills of an assistant, lowest priority number first
pub async fn list_enabled_skills(pool: &Pool, assistant_id: Uuid) -> Result<Vec<EnabledSkill>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {}, s.priority
           FROM assistant_skills s
           JOIN skill_definitions sd ON sd.id = s.skill_definition_id
          WHERE s.assistant_id = $1 AND s.is_enabled AND sd.is_active
          ORDER BY s.priority ASC, sd.name ASC",
        SKILL_COLUMNS
    );
    let rows = conn.query(&sql, &[&assistant_id]).await?;
    rows.iter()
        .map(|row| {
            Ok(EnabledSkill {
                priority: row.try_get("priority")?,
                definition: parse_skill_row(row)?,
            })
        })
        .collect()
}

/// Attach a skill to an assistant, or update the existing link
pub async fn upsert_assistant_skill(
    pool: &Pool,
    assistant_id: Uuid,
    skill_definition_id: Uuid,
    update: &AssistantSkillUpdate,
) -> Result<AssistantSkill> {
    let conn = pool.get().await?;
    let row = conn
        .query_one(
            "INSERT INTO assistant_skills
                (assistant_id, skill_definition_id, is_enabled, priority, custom_settings)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (assistant_id, skill_definition_id) DO UPDATE
                SET is_enabled = EXCLUDED.is_enabled,
                    priority = EXCLUDED.priority,
                    custom_settings = EXCLUDED.custom_settings,
                    updated_at = now()
             RETURNING assistant_id, skill_definition_id, is_enabled, priority,
                       custom_settings, created_at, updated_at",
            &[
                &assistant_id,
                &skill_definition_id,
                &update.is_enabled,
                &update.priority,
                &update.custom_settings,
            ],
        )
        .await?;
    parse_assistant_skill_row(&row)
}

pub async fn remove_assistant_skill(
    pool: &Pool,
    assistant_id: Uuid,
    skill_definition_id: Uuid,
) -> Result<bool> {
    let conn = pool.get().await?;
    let deleted = conn
        .execute(
            "DELETE FROM assistant_skills WHERE assistant_id = $1 AND skill_definition_id = $2",
            &[&assistant_id, &skill_definition_id],
        )
        .await?;
    Ok(deleted > 0)
}

pub async fn list_agents(pool: &Pool) -> Result<Vec<Agent>> {
    let conn = pool.get().await?;
    let rows = conn
        .query(
            "SELECT id, name, description, file_path, created_at, updated_at
               FROM agents ORDER BY name",
            &[],
        )
        .await?;
    rows.iter().map(parse_agent_row).collect()
}

pub async fn list_personality_templates(pool: &Pool) -> Result<Vec<PersonalityTemplate>> {
    let conn = pool.get().await?;
    let rows = conn
        .query(
            "SELECT id, user_id, name, description, personality_type, system_prompt,
                    characteristics, is_active, is_public, created_at, updated_at
               FROM personality_templates
              WHERE is_active IS NOT FALSE
              ORDER BY name",
            &[],
        )
        .await?;
    rows.iter().map(parse_personality_template_row).collect()
}

pub async fn list_voices(pool: &Pool) -> Result<Vec<Voice>> {
    let conn = pool.get().await?;
    let rows = conn
        .query(
            "SELECT id, user_id, name, provider, voice_id, language, gender, age_group,
                    description, sample_url, settings, is_active, is_public, created_at, updated_at
               FROM voices
              WHERE is_active IS NOT FALSE
              ORDER BY name",
            &[],
        )
        .await?;
    rows.iter().map(parse_voice_row).collect()
}

pub async fn list_avatars(pool: &Pool) -> Result<Vec<Avatar>> {
    let conn = pool.get().await?;
    let rows = conn
        .query(
            "SELECT id, user_id, name, avatar_type, image_url, animated_url, style, gender,
                    age_appearance, tags, metadata, is_active, is_public, created_at, updated_at
               FROM avatars
              WHERE is_active IS NOT FALSE
              ORDER BY name",
            &[],
        )
        .await?;
    rows.iter().map(parse_avatar_row).collect()
}
