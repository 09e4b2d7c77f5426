use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Course, CourseRequest, Student, StudentRequest, StudentWithCourse};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, name, code, description
        FROM courses
        ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn insert_course(
    db: &SqlitePool,
    req: CourseRequest,
) -> Result<Course, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO courses (name, code, description)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&req.name)
    .bind(&req.code)
    .bind(&req.description)
    .execute(db)
    .await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        name: req.name,
        code: req.code,
        description: req.description,
    })
}

// Full overwrite; echoes the submitted values back, not the stored row.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    req: CourseRequest,
) -> Result<Course, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE courses
        SET name = ?1,
            code = ?2,
            description = ?3
        WHERE id = ?4
        "#,
    )
    .bind(&req.name)
    .bind(&req.code)
    .bind(&req.description)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Course {
        id,
        name: req.name,
        code: req.code,
        description: req.description,
    })
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

// Page query plus an independent count query over the identical
// predicate; the pair is not wrapped in a transaction, so the total can
// lag the page under concurrent writes.
pub async fn list_students(
    db: &SqlitePool,
    search: &str,
    course_id: Option<i64>,
    page: i64,
    limit: i64,
) -> Result<(Vec<StudentWithCourse>, i64), sqlx::Error> {
    let pattern = format!("%{}%", search);
    let offset = (page - 1) * limit;

    match course_id {
        Some(course_id) => {
            let rows = sqlx::query_as::<_, StudentWithCourse>(
                r#"
                SELECT s.id, s.name, s.email, s.age, s.course_id, s.created_at,
                       c.name AS course_name
                FROM students s
                LEFT JOIN courses c ON s.course_id = c.id
                WHERE (s.name LIKE ?1 OR s.email LIKE ?1) AND s.course_id = ?2
                ORDER BY s.created_at DESC, s.id DESC
                LIMIT ?3 OFFSET ?4
                "#,
            )
            .bind(&pattern)
            .bind(course_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;

            let total = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM students
                WHERE (name LIKE ?1 OR email LIKE ?1) AND course_id = ?2
                "#,
            )
            .bind(&pattern)
            .bind(course_id)
            .fetch_one(db)
            .await?;

            Ok((rows, total))
        }
        None => {
            let rows = sqlx::query_as::<_, StudentWithCourse>(
                r#"
                SELECT s.id, s.name, s.email, s.age, s.course_id, s.created_at,
                       c.name AS course_name
                FROM students s
                LEFT JOIN courses c ON s.course_id = c.id
                WHERE (s.name LIKE ?1 OR s.email LIKE ?1)
                ORDER BY s.created_at DESC, s.id DESC
                LIMIT ?2 OFFSET ?3
                "#,
            )
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;

            let total = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM students
                WHERE (name LIKE ?1 OR email LIKE ?1)
                "#,
            )
            .bind(&pattern)
            .fetch_one(db)
            .await?;

            Ok((rows, total))
        }
    }
}

pub async fn find_student_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<StudentWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, StudentWithCourse>(
        r#"
        SELECT s.id, s.name, s.email, s.age, s.course_id, s.created_at,
               c.name AS course_name
        FROM students s
        LEFT JOIN courses c ON s.course_id = c.id
        WHERE s.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_student(
    db: &SqlitePool,
    req: StudentRequest,
) -> Result<Student, sqlx::Error> {
    let created_at = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO students (name, email, age, course_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(req.age)
    .bind(req.course_id)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(Student {
        id: result.last_insert_rowid(),
        name: req.name,
        email: req.email,
        age: req.age,
        course_id: req.course_id,
        created_at,
    })
}

// Full overwrite of the mutable fields; created_at is never touched.
pub async fn update_student(
    db: &SqlitePool,
    id: i64,
    req: StudentRequest,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE students
        SET name = ?1,
            email = ?2,
            age = ?3,
            course_id = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(req.age)
    .bind(req.course_id)
    .bind(id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}
