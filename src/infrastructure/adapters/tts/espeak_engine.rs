//! eSpeak Engine - 本地离线 TTS 引擎
//!
//! 实现 LocalSpeechEnginePort trait，通过 `espeak-ng` 子进程合成 WAV 文件。
//!
//! 引擎句柄在第一次使用时获取（探测可执行文件并缓存音色列表），
//! 进程退出前调用 `shutdown` 释放。

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::application::ports::{LocalSpeechEnginePort, LocalSynthesisRequest, TtsError};
use crate::domain::narration::Voice;

/// eSpeak 引擎配置
#[derive(Debug, Clone)]
pub struct EspeakEngineConfig {
    /// 可执行文件名或路径
    pub program: String,
}

impl Default for EspeakEngineConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
        }
    }
}

/// 已获取的引擎句柄
#[derive(Debug, Clone)]
struct EngineHandle {
    version: String,
    voices: Vec<Voice>,
}

/// eSpeak 本地引擎
pub struct EspeakEngine {
    config: EspeakEngineConfig,
    handle: Mutex<Option<EngineHandle>>,
}

impl EspeakEngine {
    pub fn new(config: EspeakEngineConfig) -> Self {
        Self {
            config,
            handle: Mutex::new(None),
        }
    }

    /// 引擎是否已获取
    pub async fn is_acquired(&self) -> bool {
        self.handle.lock().await.is_some()
    }

    /// 获取引擎句柄，已获取时直接返回
    async fn acquire(&self) -> Result<EngineHandle, TtsError> {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.as_ref() {
            return Ok(handle.clone());
        }

        let version = self.run(&["--version"]).await?;
        let voices = parse_voices(&self.run(&["--voices"]).await?);

        let handle = EngineHandle {
            version: version.lines().next().unwrap_or_default().trim().to_string(),
            voices,
        };

        tracing::info!(
            program = %self.config.program,
            version = %handle.version,
            voices = handle.voices.len(),
            "Local TTS engine initialized"
        );

        *guard = Some(handle.clone());
        Ok(handle)
    }

    async fn run(&self, args: &[&str]) -> Result<String, TtsError> {
        let output = Command::new(&self.config.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                TtsError::EngineUnavailable(format!("{}: {}", self.config.program, e))
            })?;

        if !output.status.success() {
            return Err(TtsError::EngineUnavailable(format!(
                "{} {} exited with {}: {}",
                self.config.program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// 把 0.0 - 1.0 的音量映射到 espeak 的振幅，1.0 对应默认振幅 100
fn amplitude(volume: f32) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// 解析 `espeak-ng --voices` 输出
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  en-gb           --/M      English_(Great_Britain) gmw/en      (en 2)
///  5  hi              --/M      Hindi              inc/hi
/// ```
pub fn parse_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(Voice {
                id: fields[1].to_string(),
                name: fields[3].replace('_', " "),
                language: fields[1].to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl LocalSpeechEnginePort for EspeakEngine {
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        Ok(self.acquire().await?.voices)
    }

    async fn synthesize_to_file(
        &self,
        request: LocalSynthesisRequest,
        output: &Path,
    ) -> Result<(), TtsError> {
        self.acquire().await?;

        let mut command = Command::new(&self.config.program);
        command
            .arg("-s")
            .arg(request.rate.to_string())
            .arg("-a")
            .arg(amplitude(request.volume).to_string());
        if let Some(voice) = &request.voice_id {
            command.arg("-v").arg(voice);
        }
        command
            .arg("-w")
            .arg(output)
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            program = %self.config.program,
            voice = ?request.voice_id,
            rate = request.rate,
            output = %output.display(),
            "Running local TTS engine"
        );

        let mut child = command
            .spawn()
            .map_err(|e| TtsError::EngineUnavailable(format!("{}: {}", self.config.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request.text.as_bytes())
                .await
                .map_err(|e| TtsError::IoError(e.to_string()))?;
            // 关闭 stdin，引擎才会开始合成
            drop(stdin);
        }

        let result = child
            .wait_with_output()
            .await
            .map_err(|e| TtsError::EngineFailed(e.to_string()))?;

        if !result.status.success() {
            return Err(TtsError::EngineFailed(format!(
                "exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let written = tokio::fs::metadata(output)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if written == 0 {
            return Err(TtsError::EngineFailed(
                "engine produced no audio".to_string(),
            ));
        }

        Ok(())
    }

    async fn shutdown(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            tracing::info!(version = %handle.version, "Local TTS engine released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICES_OUTPUT: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  en-gb           --/M      English_(Great_Britain) gmw/en      (en 2)
 5  en-us           --/M      English_(America)  gmw/en-US            (en 3)
 5  hi              --/M      Hindi              inc/hi
";

    #[test]
    fn test_parse_voices() {
        let voices = parse_voices(VOICES_OUTPUT);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].id, "en-gb");
        assert_eq!(voices[0].name, "English (Great Britain)");
        assert_eq!(voices[2].id, "hi");
        assert_eq!(voices[2].name, "Hindi");
        assert!(parse_voices("").is_empty());
    }

    #[test]
    fn test_amplitude_mapping() {
        // 默认音量 0.9 略低于 espeak 的正常响度
        assert_eq!(amplitude(0.9), 90);
        assert_eq!(amplitude(1.0), 100);
        assert_eq!(amplitude(0.5), 50);
        assert_eq!(amplitude(2.0), 100);
        assert_eq!(amplitude(-1.0), 0);
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let engine = EspeakEngine::new(EspeakEngineConfig {
            program: "definitely-not-an-installed-tts-engine".to_string(),
        });

        let err = engine.list_voices().await.unwrap_err();
        assert!(matches!(err, TtsError::EngineUnavailable(_)));
        assert!(!engine.is_acquired().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_synthesize_with_stub_engine() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-espeak");
        let args_log = dir.path().join("args.log");
        std::fs::write(
            &script,
            format!(
                r#"#!/bin/sh
case "$1" in
  --version) echo "eSpeak NG text-to-speech: 1.51"; exit 0 ;;
  --voices) printf '%s' '{voices}'; exit 0 ;;
esac
echo "$@" > "{log}"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-w" ]; then shift; out="$1"; fi
  shift
done
cat > /dev/null
printf 'RIFF' > "$out"
"#,
                voices = VOICES_OUTPUT,
                log = args_log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let engine = EspeakEngine::new(EspeakEngineConfig {
            program: script.display().to_string(),
        });

        let voices = engine.list_voices().await.unwrap();
        assert_eq!(voices.len(), 3);
        assert!(engine.is_acquired().await);

        let output = dir.path().join("out.wav");
        engine
            .synthesize_to_file(
                LocalSynthesisRequest {
                    text: "नमस्ते".to_string(),
                    voice_id: Some("hi".to_string()),
                    rate: 150,
                    volume: 0.9,
                },
                &output,
            )
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"RIFF");
        let args = std::fs::read_to_string(&args_log).unwrap();
        assert!(args.contains("-s 150"));
        assert!(args.contains("-a 90"));
        assert!(args.contains("-v hi"));

        engine.shutdown().await;
        assert!(!engine.is_acquired().await);
    }
}
