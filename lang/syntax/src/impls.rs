use crate::*;
use std::fmt;

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Triple { source, role, target } = self;
        match target {
            | Some(target) => write!(f, "({source}, {role}, {target})"),
            | None => write!(f, "({source}, {role}, null)"),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Alignment { indices, prefix } = self;
        let indices: Vec<String> = indices.iter().map(usize::to_string).collect();
        write!(f, "~{}{}", prefix.as_deref().unwrap_or_default(), indices.join(","))
    }
}

impl fmt::Display for Epidatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Epidatum::Push(var) => write!(f, "push({var})"),
            | Epidatum::Pop => write!(f, "pop"),
            | Epidatum::Alignment(aln) | Epidatum::RoleAlignment(aln) => write!(f, "{aln}"),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Constant::Symbol(s) => write!(f, "{s}"),
            | Constant::String(s) => write!(f, "{}", quote(s)),
            | Constant::Integer(i) => write!(f, "{i}"),
            | Constant::Float(x) => write!(f, "{x}"),
            | Constant::Null => Ok(()),
        }
    }
}
