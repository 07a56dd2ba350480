//! Async wrapper tests

#![cfg(feature = "async")]

mod common;

use bytes::Bytes;
use common::*;
use futures::StreamExt;
use pkblast::{
    decompress_async, decompress_bytes_async, decompress_file, AsyncBatchProcessor, BlastError,
};

#[tokio::test]
async fn test_decompress_bytes_async() {
    let result = decompress_bytes_async(Bytes::from_static(&AIAI)).await.unwrap();
    assert_eq!(result, (0, AIAI_PLAIN.to_vec()));
}

#[tokio::test]
async fn test_decompress_async_reader() {
    let (compressed, plain) = mixed_fixture();
    let reader = std::io::Cursor::new(compressed);
    assert_eq!(decompress_async(reader).await.unwrap(), (0, plain));
}

#[tokio::test]
async fn test_async_errors_surface() {
    let err = decompress_bytes_async(Bytes::from_static(&[0x00, 0x04]))
        .await
        .unwrap_err();
    assert!(matches!(err, BlastError::InputExhausted));
}

#[tokio::test]
async fn test_decompress_file() -> Result<(), Box<dyn std::error::Error>> {
    let (compressed, plain) = mixed_fixture();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.imploded");
    let output = dir.path().join("out.bin");
    std::fs::write(&input, &compressed)?;

    let (left, written) = decompress_file(&input, &output, 512).await?;
    assert_eq!(left, 0);
    assert_eq!(written, plain.len() as u64);
    assert_eq!(std::fs::read(&output)?, plain);
    Ok(())
}

#[tokio::test]
async fn test_batch_buffers_keep_order() {
    let inputs: Vec<(Vec<u8>, Vec<u8>)> = (1..=12)
        .map(|n| {
            let plain = sample_text(n * 700);
            (encode_literals(&plain), plain)
        })
        .collect();

    let processor = AsyncBatchProcessor::new().with_concurrency(3);
    assert_eq!(processor.concurrency(), 3);

    let results = processor
        .decompress_buffers(inputs.iter().map(|(c, _)| Bytes::from(c.clone())).collect())
        .await
        .unwrap();

    assert_eq!(results.len(), inputs.len());
    for ((left, decoded), (_, plain)) in results.iter().zip(&inputs) {
        assert_eq!(*left, 0);
        assert_eq!(decoded, plain);
    }
}

#[tokio::test]
async fn test_batch_fails_on_bad_item() {
    let inputs = vec![Bytes::from_static(&AIAI), Bytes::from_static(&[0x07, 0x04, 0x00])];
    let err = AsyncBatchProcessor::new()
        .decompress_buffers(inputs)
        .await
        .unwrap_err();
    assert!(matches!(err, BlastError::MalformedLiteralFlag));
}

#[tokio::test]
async fn test_batch_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (compressed, plain) = mixed_fixture();
    let paths: Vec<_> = (0..4)
        .map(|i| dir.path().join(format!("file{i}.imploded")))
        .collect();
    for path in &paths {
        std::fs::write(path, &compressed)?;
    }

    let processor = AsyncBatchProcessor::new().with_chunk_size(100);
    let results = processor.decompress_files(paths.clone()).await?;
    for ((path, left, decoded), expected) in results.iter().zip(&paths) {
        assert_eq!(path, expected);
        assert_eq!(*left, 0);
        assert_eq!(decoded, &plain);
    }

    let streamed: Vec<_> = processor.decompress_files_streaming(paths).collect().await;
    assert_eq!(streamed.len(), 4);
    assert!(streamed.iter().all(|r| matches!(r, Ok((_, 0, d)) if d == &plain)));
    Ok(())
}
