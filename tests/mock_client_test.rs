#[cfg(feature = "mock")]
mod mock_tests {
    use lastfm_explorer::{
        ActionOutcome, ArtistDetail, ArtistStats, ArtistSummary, Bio, BrowseController,
        LastFmApiClient, LastFmError, MockLastFmApiClient, Result, TrackSummary,
    };
    use mockall::predicate::*;

    fn queen_detail() -> ArtistDetail {
        ArtistDetail {
            name: "Queen".to_string(),
            mbid: None,
            url: "https://www.last.fm/music/Queen".to_string(),
            images: vec![],
            on_tour: false,
            stats: ArtistStats {
                listeners: 5_372_937,
                playcount: 361_582_010,
            },
            similar: vec![],
            tags: vec![],
            bio: Bio::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_search_artists() -> Result<()> {
        let mut mock_client = MockLastFmApiClient::new();

        mock_client
            .expect_search_artists()
            .with(eq("Queen"), eq(10))
            .times(1)
            .returning(|_, _| {
                Ok(vec![ArtistSummary {
                    name: "Queen".to_string(),
                    mbid: None,
                    url: "https://www.last.fm/music/Queen".to_string(),
                    images: vec![],
                    listeners: 5_372_937,
                    streamable: false,
                }])
            });

        // Use the mock as a trait object
        let client: &dyn LastFmApiClient = &mock_client;
        let artists = client.search_artists("Queen", 10).await?;

        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Queen");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_drives_controller() {
        let mut mock_client = MockLastFmApiClient::new();

        mock_client
            .expect_get_artist_detail()
            .with(eq("Queen"))
            .times(1)
            .returning(|_| Ok(queen_detail()));
        mock_client
            .expect_get_top_tracks()
            .with(eq("Queen"), eq(3))
            .times(1)
            .returning(|_, _| {
                Ok(["Bohemian Rhapsody", "Don't Stop Me Now", "Under Pressure"]
                    .iter()
                    .map(|name| TrackSummary {
                        name: name.to_string(),
                        playcount: 1,
                        listeners: 1,
                        url: String::new(),
                        rank: None,
                    })
                    .collect())
            });
        mock_client
            .expect_get_top_albums()
            .times(1)
            .returning(|_, _| {
                Err(LastFmError::Api {
                    code: 11,
                    message: "Service Offline - This service is temporarily offline".to_string(),
                })
            });

        let controller = BrowseController::new(mock_client).with_limit(3);

        assert!(controller.select_artist("Queen").await.is_completed());
        let (tracks, albums) =
            futures::join!(controller.load_top_tracks(), controller.load_top_albums());

        assert_eq!(tracks, ActionOutcome::Completed);
        assert!(matches!(albums, ActionOutcome::Failed(_)));

        let session = controller.snapshot();
        assert_eq!(session.tracks.len(), 3);
        assert!(session.albums.is_empty());
        assert_eq!(
            session.error.as_deref(),
            Some("Service Offline - This service is temporarily offline")
        );
    }
}

#[cfg(not(feature = "mock"))]
mod no_mock_tests {
    #[test]
    fn test_mock_feature_disabled() {
        // This test ensures the code compiles even when the mock feature is disabled
        println!("Mock feature is disabled - MockLastFmApiClient is not available");
    }
}
