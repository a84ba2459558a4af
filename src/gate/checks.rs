//! The ordered authorization pipeline.
//!
//! Each check is a named predicate over the [`AuthContext`]; the pipeline
//! runs them in a strict order and stops at the first rejection.

use axum::http::StatusCode;

use crate::config::GateConfig;
use crate::gate::context::AuthContext;

/// Terminal rejection produced by a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    Unauthenticated,
    InsufficientRole,
    DepartmentMismatch,
    NotOwner,
    OutsideBusinessHours,
}

impl GateRejection {
    /// HTTP status the rejection maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GateRejection::Unauthenticated => StatusCode::UNAUTHORIZED,
            _ => StatusCode::FORBIDDEN,
        }
    }

    /// User-facing message. Surfaced verbatim; never leaks more than the kind.
    pub fn message(&self) -> &'static str {
        match self {
            GateRejection::Unauthenticated => "Unauthorized",
            GateRejection::InsufficientRole => "Insufficient role permissions",
            GateRejection::DepartmentMismatch => "Access denied based on department",
            GateRejection::NotOwner => "You do not own this resource",
            GateRejection::OutsideBusinessHours => "Access restricted to business hours",
        }
    }

    /// Stable identifier used as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            GateRejection::Unauthenticated => "unauthenticated",
            GateRejection::InsufficientRole => "insufficient_role",
            GateRejection::DepartmentMismatch => "department_mismatch",
            GateRejection::NotOwner => "not_owner",
            GateRejection::OutsideBusinessHours => "outside_business_hours",
        }
    }
}

/// A single authorization predicate.
pub trait GateCheck: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Pass, or reject with a terminal kind.
    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection>;
}

/// Subject must be present.
pub struct AuthenticationCheck;

impl GateCheck for AuthenticationCheck {
    fn name(&self) -> &'static str {
        "authentication"
    }

    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        match ctx.subject {
            Some(_) => Ok(()),
            None => Err(GateRejection::Unauthenticated),
        }
    }
}

/// Subject's role must be in the allowed set.
pub struct RoleCheck {
    allowed: Vec<String>,
}

impl RoleCheck {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl GateCheck for RoleCheck {
    fn name(&self) -> &'static str {
        "role"
    }

    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        let subject = ctx.subject.as_ref().ok_or(GateRejection::Unauthenticated)?;
        if self
            .allowed
            .iter()
            .any(|role| role.eq_ignore_ascii_case(&subject.role))
        {
            Ok(())
        } else {
            Err(GateRejection::InsufficientRole)
        }
    }
}

/// Subject must belong to the resource's department.
pub struct DepartmentCheck;

impl GateCheck for DepartmentCheck {
    fn name(&self) -> &'static str {
        "department"
    }

    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        let subject = ctx.subject.as_ref().ok_or(GateRejection::Unauthenticated)?;
        if subject.department_id == ctx.resource.department_id {
            Ok(())
        } else {
            Err(GateRejection::DepartmentMismatch)
        }
    }
}

/// Subject must own the resource.
pub struct OwnershipCheck;

impl GateCheck for OwnershipCheck {
    fn name(&self) -> &'static str {
        "ownership"
    }

    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        let subject = ctx.subject.as_ref().ok_or(GateRejection::Unauthenticated)?;
        if subject.id == ctx.resource.owner_id {
            Ok(())
        } else {
            Err(GateRejection::NotOwner)
        }
    }
}

/// Current hour must fall inside the configured business-hours window.
pub struct BusinessHoursCheck {
    start_hour: u32,
    end_hour: u32,
    end_inclusive: bool,
}

impl BusinessHoursCheck {
    pub fn new(start_hour: u32, end_hour: u32, end_inclusive: bool) -> Self {
        Self {
            start_hour,
            end_hour,
            end_inclusive,
        }
    }

    fn contains(&self, hour: u32) -> bool {
        if hour < self.start_hour {
            return false;
        }
        if self.end_inclusive {
            hour <= self.end_hour
        } else {
            hour < self.end_hour
        }
    }
}

impl GateCheck for BusinessHoursCheck {
    fn name(&self) -> &'static str {
        "business_hours"
    }

    fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        if self.contains(ctx.hour) {
            Ok(())
        } else {
            Err(GateRejection::OutsideBusinessHours)
        }
    }
}

/// Ordered list of checks; first failure wins.
pub struct GatePipeline {
    checks: Vec<Box<dyn GateCheck>>,
}

impl GatePipeline {
    pub fn new(checks: Vec<Box<dyn GateCheck>>) -> Self {
        Self { checks }
    }

    /// The standard pipeline: authentication, role, department,
    /// ownership, business hours. Ordering matters for both cost and
    /// information disclosure.
    pub fn standard(config: &GateConfig) -> Self {
        let hours = &config.business_hours;
        Self::new(vec![
            Box::new(AuthenticationCheck),
            Box::new(RoleCheck::new(config.allowed_roles.clone())),
            Box::new(DepartmentCheck),
            Box::new(OwnershipCheck),
            Box::new(BusinessHoursCheck::new(
                hours.start_hour,
                hours.end_hour,
                hours.end_inclusive,
            )),
        ])
    }

    /// Run every check in order, short-circuiting on the first rejection.
    pub fn evaluate(&self, ctx: &AuthContext) -> Result<(), GateRejection> {
        for check in &self.checks {
            if let Err(rejection) = check.evaluate(ctx) {
                tracing::debug!(check = check.name(), kind = rejection.kind(), "Gate check failed");
                return Err(rejection);
            }
        }
        Ok(())
    }
}
