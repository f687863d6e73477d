//! # 사용자 데이터베이스 쿼리 모듈
//!
//! 로그인 식별자는 세 가지입니다: 이메일, 전화번호, GitHub 로그인 id.
//! 세 컬럼 모두 값이 있을 때만 유일해야 하며(NULL은 여러 행 가능),
//! 중복 값으로 INSERT/UPDATE하면 유니크 제약 위반 에러가 그대로 반환됩니다.

use super::{expect_affected, Repository};
use crate::error::AppError;
use crate::models::*;
use chrono::Utc;

impl Repository {
    /// 새 사용자를 저장하고 반환합니다.
    pub async fn insert_user(&self, new: &NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let verify_state = if new.verify_state.is_empty() {
            "0"
        } else {
            new.verify_state.as_str()
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, telephone, password, verify_state, secret_key, out_time,
                               github_login_id, is_admin, avatar_url, nick_name,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, email, telephone, password, verify_state, secret_key, out_time,
                      github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            "#,
        )
        .bind(&new.email)
        .bind(&new.telephone)
        .bind(&new.password)
        .bind(verify_state)
        .bind(&new.secret_key)
        .bind(new.out_time)
        .bind(&new.github_login_id)
        .bind(new.is_admin)
        .bind(&new.avatar_url)
        .bind(&new.nick_name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = user.id, "User inserted");
        Ok(user)
    }

    /// 사용자 행 전체를 덮어씁니다 (id와 created_at 제외).
    pub async fn update_user(&self, user: &User) -> Result<User, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, telephone = ?, password = ?, verify_state = ?, secret_key = ?,
                out_time = ?, github_login_id = ?, is_admin = ?, avatar_url = ?,
                nick_name = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.telephone)
        .bind(&user.password)
        .bind(&user.verify_state)
        .bind(&user.secret_key)
        .bind(user.out_time)
        .bind(&user.github_login_id)
        .bind(user.is_admin)
        .bind(&user.avatar_url)
        .bind(&user.nick_name)
        .bind(Utc::now())
        .bind(user.id)
        .execute(&self.pool)
        .await?;
        expect_affected(result)?;

        self.get_user(user.id).await
    }

    /// 이메일(로그인 아이디)로 사용자를 조회합니다.
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, telephone, password, verify_state, secret_key, out_time,
                   github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// 전화번호로 사용자를 조회합니다.
    pub async fn get_user_by_telephone(&self, telephone: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, telephone, password, verify_state, secret_key, out_time,
                   github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            FROM users
            WHERE telephone = ?
            "#,
        )
        .bind(telephone)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// GitHub 로그인 id로 사용자를 찾고, 없으면 `new`로 만들어 반환합니다.
    ///
    /// 이미 있는 사용자의 나머지 필드는 `new`의 값으로 바꾸지 않습니다.
    /// `github_login_id`가 None이면 찾을 키가 없으므로 그냥 새로 만듭니다.
    pub async fn first_or_create_user(&self, new: &NewUser) -> Result<User, AppError> {
        let Some(github_id) = new.github_login_id.as_deref() else {
            return self.insert_user(new).await;
        };

        if let Some(user) = self.find_user_by_github_id(github_id).await? {
            return Ok(user);
        }

        match self.insert_user(new).await {
            Ok(user) => Ok(user),
            // 조회와 삽입 사이에 다른 요청이 같은 id로 먼저 만든 경우
            Err(AppError::Database(sqlx::Error::Database(db_err)))
                if db_err.is_unique_violation() =>
            {
                match self.find_user_by_github_id(github_id).await? {
                    Some(user) => Ok(user),
                    None => Err(AppError::Database(sqlx::Error::Database(db_err))),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// id로 사용자를 조회합니다.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, telephone, password, verify_state, secret_key, out_time,
                   github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// 프로필(아바타, 닉네임)만 수정합니다.
    pub async fn update_profile(
        &self,
        id: i64,
        avatar_url: &str,
        nick_name: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query(
            "UPDATE users SET avatar_url = ?, nick_name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(avatar_url)
        .bind(nick_name)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        expect_affected(result)?;

        self.get_user(id).await
    }

    /// 이메일만 수정합니다.
    pub async fn update_email(&self, id: i64, email: &str) -> Result<User, AppError> {
        let result = sqlx::query("UPDATE users SET email = ?, updated_at = ? WHERE id = ?")
            .bind(email)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_affected(result)?;

        self.get_user(id).await
    }

    /// GitHub 로그인 id만 수정합니다 (기존 계정에 GitHub 계정을 연결할 때).
    pub async fn update_github_id(&self, id: i64, github_id: &str) -> Result<User, AppError> {
        let result =
            sqlx::query("UPDATE users SET github_login_id = ?, updated_at = ? WHERE id = ?")
                .bind(github_id)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;
        expect_affected(result)?;

        self.get_user(id).await
    }

    /// 관리자가 아닌 사용자 목록
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, telephone, password, verify_state, secret_key, out_time,
                   github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            FROM users
            WHERE is_admin = ?
            ORDER BY id
            "#,
        )
        .bind(false)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// 관리자가 아닌 사용자 수
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_admin = ?")
            .bind(false)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 사용자를 삭제합니다. 없는 사용자면 `false`입니다.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_user_by_github_id(&self, github_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, telephone, password, verify_state, secret_key, out_time,
                   github_login_id, is_admin, avatar_url, nick_name, created_at, updated_at
            FROM users
            WHERE github_login_id = ?
            "#,
        )
        .bind(github_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::repo;
    use crate::error::AppError;
    use crate::models::*;
    use chrono::{TimeZone, Utc};

    fn local(email: &str) -> NewUser {
        NewUser {
            email: Some(email.to_string()),
            password: Some("hashed".into()),
            secret_key: Some("s3cr3t".into()),
            out_time: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            nick_name: "local".into(),
            ..Default::default()
        }
    }

    fn github(login_id: &str) -> NewUser {
        NewUser {
            github_login_id: Some(login_id.to_string()),
            avatar_url: "https://avatars.example/1.png".into(),
            nick_name: "octo".into(),
            ..Default::default()
        }
    }

    fn is_unique_violation(err: &AppError) -> bool {
        matches!(err, AppError::Database(sqlx::Error::Database(e)) if e.is_unique_violation())
    }

    #[tokio::test]
    async fn insert_then_lookup_round_trips() {
        let repo = repo().await;
        let user = repo.insert_user(&local("a@example.com")).await.unwrap();

        assert_eq!(user.verify_state, "0");
        assert!(!user.is_admin);
        assert_eq!(repo.get_user(user.id).await.unwrap(), user);
        assert_eq!(repo.get_user_by_username("a@example.com").await.unwrap(), user);
        assert!(repo.get_user_by_username("nobody@example.com").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn unique_identities_are_enforced_but_nulls_repeat() {
        let repo = repo().await;
        repo.insert_user(&local("dup@example.com")).await.unwrap();
        let err = repo.insert_user(&local("dup@example.com")).await.unwrap_err();
        assert!(is_unique_violation(&err), "{err}");

        // email/telephone/github id가 모두 NULL인 사용자는 여러 명 가능
        repo.insert_user(&NewUser::default()).await.unwrap();
        repo.insert_user(&NewUser::default()).await.unwrap();

        let phone = NewUser {
            telephone: Some("010-1234-5678".into()),
            ..Default::default()
        };
        let with_phone = repo.insert_user(&phone).await.unwrap();
        assert_eq!(repo.get_user_by_telephone("010-1234-5678").await.unwrap(), with_phone);
        assert!(is_unique_violation(&repo.insert_user(&phone).await.unwrap_err()));
    }

    #[tokio::test]
    async fn first_or_create_binds_to_existing_github_user() {
        let repo = repo().await;
        let created = repo.first_or_create_user(&github("1234")).await.unwrap();
        let again = repo
            .first_or_create_user(&NewUser {
                nick_name: "renamed".into(),
                ..github("1234")
            })
            .await
            .unwrap();

        assert_eq!(again, created);
        assert_eq!(again.nick_name, "octo");
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn targeted_updates_touch_one_field() {
        let repo = repo().await;
        let user = repo.insert_user(&local("old@example.com")).await.unwrap();

        let user2 = repo.update_email(user.id, "new@example.com").await.unwrap();
        assert_eq!(user2.email.as_deref(), Some("new@example.com"));
        assert_eq!(user2.nick_name, user.nick_name);

        let user3 = repo.update_github_id(user.id, "gh-9").await.unwrap();
        assert_eq!(user3.github_login_id.as_deref(), Some("gh-9"));
        assert_eq!(user3.email, user2.email);

        let user4 = repo.update_profile(user.id, "https://a/b.png", "nick").await.unwrap();
        assert_eq!((user4.avatar_url.as_str(), user4.nick_name.as_str()), ("https://a/b.png", "nick"));
        assert_eq!(user4.github_login_id, user3.github_login_id);
        assert_eq!(user4.password, user.password);

        assert!(repo.update_email(9999, "x@example.com").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_user_overwrites_the_record() {
        let repo = repo().await;
        let mut user = repo.insert_user(&local("full@example.com")).await.unwrap();
        user.email = None;
        user.telephone = Some("555".into());
        user.verify_state = "1".into();
        user.secret_key = None;
        user.out_time = None;
        user.is_admin = true;

        let updated = repo.update_user(&user).await.unwrap();
        assert_eq!(updated.email, None);
        assert_eq!(updated.telephone.as_deref(), Some("555"));
        assert_eq!(updated.verify_state, "1");
        assert_eq!(updated.secret_key, None);
        assert_eq!(updated.out_time, None);
        assert!(updated.is_admin);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn listing_and_counting_skip_admins() {
        let repo = repo().await;
        let reader = repo.insert_user(&local("reader@example.com")).await.unwrap();
        repo.insert_user(&NewUser {
            is_admin: true,
            ..local("admin@example.com")
        })
        .await
        .unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![reader.id]);
        assert_eq!(repo.count_users().await.unwrap(), 1);

        assert!(repo.delete_user(reader.id).await.unwrap());
        assert!(!repo.delete_user(reader.id).await.unwrap());
        assert_eq!(repo.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn secrets_are_not_serialized() {
        let repo = repo().await;
        let user = repo.insert_user(&local("json@example.com")).await.unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("secret_key").is_none());
        assert_eq!(json["email"], "json@example.com");
    }
}
