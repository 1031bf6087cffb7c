//! 临时文件
//!
//! 外部命令行工具只接受文件路径，这里把内存中的字节写入系统临时目录，
//! 并在离开作用域时删除。

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// 作用域内有效的临时文件
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// 生成一个唯一的临时路径（不创建文件）
    pub fn reserve(prefix: &str, extension: &str) -> Self {
        let name = format!("{}_{}.{}", prefix, uuid::Uuid::new_v4(), extension);
        Self {
            path: std::env::temp_dir().join(name),
        }
    }

    /// 创建临时文件并写入内容
    pub async fn write(prefix: &str, extension: &str, bytes: &[u8]) -> AppResult<Self> {
        let file = Self::reserve(prefix, extension);
        tokio::fs::write(&file.path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(file.path.display().to_string(), e))?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_removed_on_drop() {
        let file = TempFile::write("test", "bin", b"abc").await.unwrap();
        let path = file.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn test_reserve_is_unique() {
        let a = TempFile::reserve("x", "png");
        let b = TempFile::reserve("x", "png");
        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().extension().unwrap(), "png");
    }
}
