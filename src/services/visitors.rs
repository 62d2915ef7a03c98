//! Visitor lifecycle service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{RegisterVisitor, UpdateVisitor, Visitor, VisitorStatus},
    store::VisitorStore,
};

#[derive(Clone)]
pub struct VisitorsService {
    store: VisitorStore,
}

impl VisitorsService {
    pub fn new(store: VisitorStore) -> Self {
        Self { store }
    }

    /// Get a visitor by id
    pub async fn get(&self, id: i64) -> AppResult<Visitor> {
        let visitors = self.store.load_all().await?;
        visitors
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))
    }

    /// Register a new visitor: timestamps the entry, derives the visit day,
    /// and prepends the record to the register
    pub async fn register(&self, input: RegisterVisitor) -> AppResult<Visitor> {
        let input = input.trimmed();
        input.validate()?;

        let Some(photo) = input.photo else {
            return Err(AppError::Validation(
                "A captured photo is required before registration".to_string(),
            ));
        };

        let now = Utc::now();
        let registered = self.store.load_all().await?;
        let visitor = Visitor {
            id: allocate_id(&registered, now.timestamp_millis()),
            photo: Some(photo),
            name: input.name,
            company: input.company,
            phone: input.phone,
            email: input.email,
            purpose: input.purpose,
            to_meet: input.to_meet,
            department: input.department,
            check_in_time: now,
            check_out_time: None,
            date: now.date_naive(),
            status: VisitorStatus::Active,
        };

        self.store.insert_front(visitor.clone()).await?;
        tracing::info!(id = visitor.id, name = %visitor.name, "visitor registered");
        Ok(visitor)
    }

    /// Update a visitor's identity fields. The photo is replaced only when a
    /// new capture is supplied; id, check-in time, visit day, and lifecycle
    /// state are never touched.
    pub async fn update(&self, id: i64, input: UpdateVisitor) -> AppResult<Visitor> {
        let input = input.trimmed();
        input.validate()?;

        self.store
            .mutate(id, |visitor| {
                visitor.name = input.name;
                visitor.company = input.company;
                visitor.phone = input.phone;
                visitor.email = input.email;
                visitor.purpose = input.purpose;
                visitor.to_meet = input.to_meet;
                visitor.department = input.department;
                if let Some(photo) = input.photo {
                    visitor.photo = Some(photo);
                }
                Ok(())
            })
            .await
    }

    /// Check a visitor out. A completed record is rejected so the recorded
    /// check-out time is written exactly once.
    pub async fn check_out(&self, id: i64) -> AppResult<Visitor> {
        let now = Utc::now();
        let visitor = self
            .store
            .mutate(id, |visitor| {
                if visitor.check_out_time.is_some() {
                    return Err(AppError::BusinessRule(
                        "Visitor is already checked out".to_string(),
                    ));
                }
                visitor.check_out_time = Some(now);
                visitor.status = VisitorStatus::Completed;
                Ok(())
            })
            .await?;

        tracing::info!(id = visitor.id, name = %visitor.name, "visitor checked out");
        Ok(visitor)
    }

    /// Delete a visitor record permanently (hard delete; any confirmation
    /// dialog is the caller's concern)
    pub async fn delete(&self, id: i64) -> AppResult<Visitor> {
        let removed = self.store.remove(id).await?;
        tracing::info!(id = removed.id, name = %removed.name, "visitor deleted");
        Ok(removed)
    }

    /// Startup reconciliation: every record still active on a day before
    /// today is checked out at 23:59:59 of its own visit day. Persists once
    /// iff anything changed; returns the number of records transitioned.
    pub async fn auto_check_out_stale(&self) -> AppResult<usize> {
        let today = Utc::now().date_naive();
        let mut visitors = self.store.load_all().await?;
        let mut transitioned = 0;

        for visitor in visitors.iter_mut() {
            if visitor.is_active() && visitor.date < today {
                let Some(end_of_day) = visitor.date.and_hms_opt(23, 59, 59) else {
                    continue;
                };
                visitor.check_out_time = Some(end_of_day.and_utc());
                visitor.status = VisitorStatus::Completed;
                transitioned += 1;
            }
        }

        if transitioned > 0 {
            self.store.persist(&visitors).await?;
            tracing::info!(count = transitioned, "auto-checked-out stale visitors");
        }
        Ok(transitioned)
    }
}

/// Ids are creation timestamps in epoch milliseconds. Two registrations
/// inside the same millisecond would collide, so the candidate is bumped
/// past the newest existing id; ids stay monotonic and are never reused.
fn allocate_id(visitors: &[Visitor], candidate: i64) -> i64 {
    let newest = visitors.iter().map(|v| v.id).max().unwrap_or(0);
    candidate.max(newest + 1)
}
