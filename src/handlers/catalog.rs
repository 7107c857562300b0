// Read-only catalog handlers: skills, agents and persona components

use warp::http::StatusCode;

use crate::db::Database;

pub async fn list_skills_handler(db: Database) -> Result<impl warp::Reply, warp::Rejection> {
    let skills = db.list_skill_definitions().await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&skills),
        StatusCode::OK,
    ))
}

pub async fn list_agents_handler(db: Database) -> Result<impl warp::Reply, warp::Rejection> {
    let agents = db.list_agents().await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&agents),
        StatusCode::OK,
    ))
}

pub async fn list_personality_templates_handler(
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let templates = db.list_personality_templates().await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&templates),
        StatusCode::OK,
    ))
}

pub async fn list_voices_handler(db: Database) -> Result<impl warp::Reply, warp::Rejection> {
    let voices = db.list_voices().await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&voices),
        StatusCode::OK,
    ))
}

pub async fn list_avatars_handler(db: Database) -> Result<impl warp::Reply, warp::Rejection> {
    let avatars = db.list_avatars().await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&avatars),
        StatusCode::OK,
    ))
}
