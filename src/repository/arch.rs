// src/repository/arch.rs

//! Debian architecture wildcard matching
//!
//! Architecture restrictions may name a concrete architecture (`amd64`,
//! `kfreebsd-i386`) or a wildcard where either half of the `kernel-cpu`
//! pair is `any` (`linux-any`, `any-i386`). Bare names such as `i386` are
//! Linux architectures.

/// Split an architecture into its (kernel, cpu) halves
pub fn kernel_arch_split(arch: &str) -> (&str, &str) {
    match arch.split_once('-') {
        Some((kernel, cpu)) => (kernel, cpu),
        None => ("linux", arch),
    }
}

/// Does the restriction entry `proposed` cover the concrete architecture `bound`?
pub fn arch_applies(proposed: &str, bound: &str) -> bool {
    if proposed == bound || proposed == "all" || proposed == "any" {
        return true;
    }

    let (pkern, pcpu) = kernel_arch_split(proposed);
    let (bkern, bcpu) = kernel_arch_split(bound);

    if pkern == "any" {
        return pcpu == bcpu;
    }
    if pcpu == "any" {
        return pkern == bkern;
    }
    pkern == bkern && pcpu == bcpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(kernel_arch_split("i386"), ("linux", "i386"));
        assert_eq!(kernel_arch_split("kfreebsd-amd64"), ("kfreebsd", "amd64"));
        assert_eq!(kernel_arch_split("linux-any"), ("linux", "any"));
    }

    #[test]
    fn test_exact_and_all() {
        assert!(arch_applies("amd64", "amd64"));
        assert!(!arch_applies("amd64", "i386"));
        assert!(arch_applies("all", "hurd-i386"));
        assert!(arch_applies("any", "kfreebsd-amd64"));
    }

    #[test]
    fn test_kernel_wildcard() {
        assert!(arch_applies("linux-any", "i386"));
        assert!(arch_applies("linux-any", "arm64"));
        assert!(!arch_applies("linux-any", "kfreebsd-i386"));
        assert!(arch_applies("hurd-any", "hurd-i386"));
    }

    #[test]
    fn test_cpu_wildcard() {
        assert!(arch_applies("any-i386", "i386"));
        assert!(arch_applies("any-i386", "kfreebsd-i386"));
        assert!(!arch_applies("any-i386", "kfreebsd-amd64"));
        assert!(!arch_applies("any-i386", "amd64"));
    }
}
