//! Lifecycle value objects - provisioning tool steps and operation kinds

/// One invocation of the provisioning tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStep {
    Init,
    Plan,
    PlanDestroy,
    Apply,
    Destroy,
    Output,
}

impl LifecycleStep {
    /// Arguments passed to `terraform` for this step
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            LifecycleStep::Init => &["init", "-input=false"],
            LifecycleStep::Plan => &["plan", "-no-color", "-input=false"],
            LifecycleStep::PlanDestroy => &["plan", "-destroy", "-no-color", "-input=false"],
            LifecycleStep::Apply => &["apply", "-auto-approve", "-input=false"],
            LifecycleStep::Destroy => &["destroy", "-auto-approve", "-input=false"],
            LifecycleStep::Output => &["output", "-json"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifecycleStep::Init => "init",
            LifecycleStep::Plan => "plan",
            LifecycleStep::PlanDestroy => "plan -destroy",
            LifecycleStep::Apply => "apply",
            LifecycleStep::Destroy => "destroy",
            LifecycleStep::Output => "output",
        }
    }
}

impl std::fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which mutating operation a plan was produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Apply,
    Destroy,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Apply => "apply",
            Operation::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
